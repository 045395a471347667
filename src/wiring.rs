//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::{Arc, Mutex};

use crate::adapter::{
    resolve_data_dir, ConsoleNotice, FileJsonLog, FileStateStorage, GeminiClassifier, StdClock,
    StdFileSystem, StdIdGenerator,
};
use crate::error::Error;
use crate::ports::outbound::{Clock, FileSystem, Log, Notice, StateStorage, ThoughtClassifier};
use crate::usecase::{FocusUseCase, JournalUseCase};

const LOG_FILENAME: &str = "mindglow.jsonl";

/// 組み立て済みアプリケーション
pub struct App {
    pub journal: JournalUseCase,
    pub focus: FocusUseCase,
    pub logger: Arc<dyn Log>,
}

/// 標準アダプタで App を組み立てる。永続状態の load はここで 1 度だけ行う
pub fn wire_app() -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let data_dir = resolve_data_dir()?;
    let storage: Arc<dyn StateStorage> =
        Arc::new(FileStateStorage::new(Arc::clone(&fs), &data_dir));
    let state = Arc::new(Mutex::new(storage.load()?));

    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let id_gen = Arc::new(StdIdGenerator::new(Arc::clone(&clock)));
    let logger: Arc<dyn Log> = Arc::new(FileJsonLog::new(
        Arc::clone(&fs),
        data_dir.join(LOG_FILENAME),
    ));
    let notice: Arc<dyn Notice> = Arc::new(ConsoleNotice);
    let model = std::env::var("MINDGLOW_MODEL").ok().filter(|s| !s.is_empty());
    let classifier: Arc<dyn ThoughtClassifier> = Arc::new(GeminiClassifier::new(model));

    let journal = JournalUseCase::new(
        Arc::clone(&state),
        classifier,
        Arc::clone(&storage),
        clock,
        id_gen,
        Arc::clone(&logger),
        notice,
    );
    let focus = FocusUseCase::new(state, storage);
    Ok(App {
        journal,
        focus,
        logger,
    })
}
