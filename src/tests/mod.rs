mod journal_pipeline_tests;
