//! 分類パイプラインのアプリレベルテスト
//!
//! 分類サービスはスクリプト化したスタブ、永続化は tempdir 上の実ファイルで、
//! submit から保存までの経路全体を通す。

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use crate::adapter::{FileStateStorage, NoopLog, StdFileSystem};
use crate::domain::thought::{Mood, ThoughtCategory, ThoughtDetail, ThoughtId};
use crate::error::Error;
use crate::ports::outbound::{
    Clock, FileSystem, IdGenerator, Notice, StateStorage, ThoughtClassifier,
};
use crate::usecase::JournalUseCase;

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct SeqIdGenerator(AtomicU64);

impl IdGenerator for SeqIdGenerator {
    fn next_id(&self) -> ThoughtId {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        ThoughtId::new(format!("{:08}", n))
    }
}

#[derive(Default)]
struct RecordingNotice(Mutex<Vec<String>>);

impl RecordingNotice {
    fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl Notice for RecordingNotice {
    fn notify(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

/// 応答列を先頭から順に返すスタブ。使い切ったら Http エラー
struct ScriptedClassifier {
    responses: Mutex<VecDeque<Result<Option<String>, Error>>>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    fn new(responses: Vec<Result<Option<String>, Error>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ThoughtClassifier for ScriptedClassifier {
    fn classify(&self, _text: &str) -> Result<Option<String>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::http("no scripted response left")))
    }
}

fn journal_over(
    dir: &Path,
    classifier: Arc<dyn ThoughtClassifier>,
    notice: Arc<RecordingNotice>,
) -> JournalUseCase {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let storage: Arc<dyn StateStorage> = Arc::new(FileStateStorage::new(fs, dir));
    let state = Arc::new(Mutex::new(storage.load().unwrap()));
    JournalUseCase::new(
        state,
        classifier,
        storage,
        Arc::new(FixedClock(1_700_000_000_000)),
        Arc::new(SeqIdGenerator::default()),
        Arc::new(NoopLog),
        notice,
    )
}

fn reload(dir: &Path) -> crate::domain::state::SessionState {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    FileStateStorage::new(fs, dir).load().unwrap()
}

#[test]
fn test_submit_appends_exactly_one_thought() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![Ok(Some(
        r#"{
            "category": "TRAUMA",
            "advice": "让过去留在过去",
            "books": [{"title": "也许你该找个人聊聊", "author": "Lori Gottlieb", "reason": "接纳"}]
        }"#
        .to_string(),
    ))]));
    let journal = journal_over(tmp.path(), classifier, Arc::default());

    let thought = journal
        .submit("总是想起面试搞砸的表现", Some(Mood::Rainy))
        .unwrap();
    assert_eq!(thought.content, "总是想起面试搞砸的表现");
    assert_eq!(thought.category(), ThoughtCategory::Trauma);
    assert_eq!(thought.timestamp, 1_700_000_000_000);
    assert_eq!(thought.mood, Some(Mood::Rainy));
    match &thought.detail {
        ThoughtDetail::Trauma { ai_advice, books } => {
            assert_eq!(ai_advice.as_deref(), Some("让过去留在过去"));
            assert_eq!(books.as_ref().unwrap().len(), 1);
        }
        other => panic!("unexpected detail: {:?}", other),
    }

    let thoughts = journal.list(None, false);
    assert_eq!(thoughts.len(), 1);
    assert_eq!(thoughts[0], thought);
    // 保存済みであること
    assert_eq!(reload(tmp.path()).thoughts, thoughts);
}

#[test]
fn test_empty_input_is_rejected_before_any_io() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![]));
    let journal = journal_over(tmp.path(), Arc::clone(&classifier) as Arc<dyn ThoughtClassifier>, Arc::default());

    for text in ["", "   ", "\n\t"] {
        let err = journal.submit(text, None).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }
    assert_eq!(classifier.calls(), 0);
    assert!(journal.list(None, false).is_empty());
    assert_eq!(reload(tmp.path()).thoughts.len(), 0);
}

#[test]
fn test_malformed_response_degrades_to_other() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        Ok(Some("I cannot answer that.".to_string())),
        Ok(None),
    ]));
    let journal = journal_over(tmp.path(), classifier, Arc::default());

    // 解析不能な応答 → OTHER として成功（エラーにならない）
    let degraded = journal.submit("随便写点什么", None).unwrap();
    assert_eq!(degraded.category(), ThoughtCategory::Other);
    assert_eq!(degraded.detail, ThoughtDetail::Other { sentiment: None });

    // text part の無い応答も同じ扱い
    let empty = journal.submit("另一条", None).unwrap();
    assert_eq!(empty.category(), ThoughtCategory::Other);
    assert_eq!(journal.list(None, false).len(), 2);
}

#[test]
fn test_config_error_falls_back_and_notice_fires_once() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        Err(Error::config("API key not configured")),
        Err(Error::config("API key not configured")),
    ]));
    let notice = Arc::new(RecordingNotice::default());
    let journal = journal_over(tmp.path(), classifier, Arc::clone(&notice));

    // フォールバック規則で分類され、付随情報は付かない
    let first = journal
        .submit("总是想起面试搞砸的表现", Some(Mood::Stormy))
        .unwrap();
    assert_eq!(first.category(), ThoughtCategory::Trauma);
    assert_eq!(
        first.detail,
        ThoughtDetail::Trauma {
            ai_advice: None,
            books: None,
        }
    );
    assert_eq!(first.mood, Some(Mood::Stormy));
    assert_eq!(notice.count(), 1);

    // 2 回目は警告を出さない
    let second = journal.submit("今天天气还不错", None).unwrap();
    assert_eq!(second.category(), ThoughtCategory::Other);
    assert_eq!(notice.count(), 1);

    // フラグは永続化され、別プロセス相当でも再発火しない
    assert!(reload(tmp.path()).key_warning_shown);
    let classifier2 = Arc::new(ScriptedClassifier::new(vec![Err(Error::config(
        "API key not configured",
    ))]));
    let notice2 = Arc::new(RecordingNotice::default());
    let journal2 = journal_over(tmp.path(), classifier2, Arc::clone(&notice2));
    journal2.submit("下周三写完伦理报告初稿", None).unwrap();
    assert_eq!(notice2.count(), 0);
}

#[test]
fn test_service_error_drops_the_submission() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![Err(Error::http(
        "Gemini API error: quota exceeded",
    ))]));
    let journal = journal_over(tmp.path(), classifier, Arc::default());

    let err = journal.submit("这条会丢失", None).unwrap_err();
    assert_eq!(err.exit_code(), 69);
    assert!(journal.list(None, false).is_empty());
    assert_eq!(reload(tmp.path()).thoughts.len(), 0);
}

#[test]
fn test_thoughts_are_newest_first_and_filterable() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        Ok(Some(r#"{"category": "TODO", "refinedTask": "周三前完成初稿"}"#.to_string())),
        Ok(Some(r#"{"category": "CREATIVE", "tags": ["建筑", "季节", "形态"]}"#.to_string())),
    ]));
    let journal = journal_over(tmp.path(), classifier, Arc::default());

    journal.submit("下周三写完伦理报告初稿", None).unwrap();
    journal
        .submit("设计一栋会随季节变形的建筑", Some(Mood::Sunny))
        .unwrap();

    let all = journal.list(None, false);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category(), ThoughtCategory::Creative);
    assert_eq!(all[1].category(), ThoughtCategory::Todo);

    assert_eq!(journal.list(Some(ThoughtCategory::Todo), false).len(), 1);
    let with_mood = journal.list(None, true);
    assert_eq!(with_mood.len(), 1);
    assert_eq!(with_mood[0].category(), ThoughtCategory::Creative);

    let counts = journal.stats();
    assert_eq!((counts.todo, counts.creative, counts.moods), (1, 1, 1));
}

#[test]
fn test_toggle_and_delete_persist() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![Ok(Some(
        r#"{"category": "TODO"}"#.to_string(),
    ))]));
    let journal = journal_over(tmp.path(), classifier, Arc::default());

    let thought = journal.submit("准备周会材料", None).unwrap();
    assert!(journal.toggle_completed(&thought.id).unwrap());
    assert!(reload(tmp.path()).thoughts[0].is_completed());
    assert!(!journal.toggle_completed(&thought.id).unwrap());
    assert!(!reload(tmp.path()).thoughts[0].is_completed());

    // 無い id の削除は冪等
    assert!(!journal.delete(&ThoughtId::new("missing")).unwrap());
    assert_eq!(reload(tmp.path()).thoughts.len(), 1);
    assert!(journal.delete(&thought.id).unwrap());
    assert_eq!(reload(tmp.path()).thoughts.len(), 0);
}

#[test]
fn test_store_roundtrip_across_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        Ok(Some(r#"{"category": "OTHER", "sentiment": "宁静"}"#.to_string())),
        Ok(Some(r#"{"category": "TODO"}"#.to_string())),
    ]));
    let journal = journal_over(tmp.path(), classifier, Arc::default());
    journal.submit("今天天气还不错", Some(Mood::Sunny)).unwrap();
    journal.submit("写周报", None).unwrap();
    let before = journal.list(None, false);

    // 同じディレクトリで組み立て直す（プロセス再起動相当）
    let journal2 = journal_over(
        tmp.path(),
        Arc::new(ScriptedClassifier::new(vec![])),
        Arc::default(),
    );
    assert_eq!(journal2.list(None, false), before);
}

#[test]
fn test_second_submit_is_rejected_while_one_is_in_flight() {
    struct GateClassifier {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
    }

    impl ThoughtClassifier for GateClassifier {
        fn classify(&self, _text: &str) -> Result<Option<String>, Error> {
            self.entered.wait();
            self.release.wait();
            Ok(Some(r#"{"category": "OTHER"}"#.to_string()))
        }
    }

    let tmp = tempfile::tempdir().unwrap();
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let classifier = Arc::new(GateClassifier {
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    });
    let journal = Arc::new(journal_over(tmp.path(), classifier, Arc::default()));

    let journal_bg = Arc::clone(&journal);
    let handle = std::thread::spawn(move || journal_bg.submit("第一条", None));

    // 1 件目が分類中になるのを待ってから 2 件目を投げる
    entered.wait();
    let err = journal.submit("第二条", None).unwrap_err();
    assert_eq!(err.exit_code(), 64);
    assert!(err.to_string().contains("in flight"));

    release.wait();
    assert!(handle.join().unwrap().is_ok());

    // 完了後は再び受け付ける（ガードが解放されている）
    let thoughts = journal.list(None, false);
    assert_eq!(thoughts.len(), 1);
    assert_eq!(thoughts[0].content, "第一条");
}
