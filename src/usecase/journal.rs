//! 念頭の分類パイプライン
//!
//! 入力テキスト → (リモート分類 | フォールバック規則) → Thought → ストア反映 → 保存。
//! 分類経路のエラーはここで閉じる: 呼び出し側から見える失敗の影響は
//! 「Thought が増えない」ことと、設定エラー時の一度きり警告だけ。

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::classification::AiClassification;
use crate::domain::fallback::fallback_classify;
use crate::domain::state::{CategoryCounts, SessionState};
use crate::domain::thought::{Mood, Thought, ThoughtCategory, ThoughtDetail, ThoughtId};
use crate::error::Error;
use crate::ports::outbound::{
    now_iso8601, Clock, IdGenerator, Log, LogLevel, LogRecord, Notice, StateStorage,
    ThoughtClassifier,
};

/// 設定エラー時に一度だけ出す利用者向け警告
const KEY_WARNING: &str = "Classification service is not configured; thoughts are categorized \
by the offline keyword rule. Set GEMINI_API_KEY to enable AI classification.";

/// 分類パイプラインと Thought ストア操作のユースケース
pub struct JournalUseCase {
    state: Arc<Mutex<SessionState>>,
    classifier: Arc<dyn ThoughtClassifier>,
    storage: Arc<dyn StateStorage>,
    clock: Arc<dyn Clock>,
    id_gen: Arc<dyn IdGenerator>,
    logger: Arc<dyn Log>,
    notice: Arc<dyn Notice>,
    /// 同時に 1 つしか submit を許さないフラグ（UI ではなくここが持つ）
    in_flight: AtomicBool,
}

/// submit 完了時に in_flight を必ず下ろすための解放ガード
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl JournalUseCase {
    pub fn new(
        state: Arc<Mutex<SessionState>>,
        classifier: Arc<dyn ThoughtClassifier>,
        storage: Arc<dyn StateStorage>,
        clock: Arc<dyn Clock>,
        id_gen: Arc<dyn IdGenerator>,
        logger: Arc<dyn Log>,
        notice: Arc<dyn Notice>,
    ) -> Self {
        Self {
            state,
            classifier,
            storage,
            clock,
            id_gen,
            logger,
            notice,
            in_flight: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// テキストを分類して Thought として記録する
    ///
    /// 分類結果は 3 系統:
    /// - 成功（解析不能な応答は OTHER へ劣化。成功として扱い、区別できない）
    /// - 設定エラー → フォールバック規則 + 一度きり警告
    /// - それ以外の失敗 → Thought を作らずエラーを返す
    pub fn submit(&self, text: &str, mood: Option<Mood>) -> Result<Thought, Error> {
        if text.trim().is_empty() {
            return Err(Error::validation("Cannot record an empty thought"));
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::validation(
                "A classification is already in flight; wait for it to finish",
            ));
        }
        let _guard = InFlightGuard(&self.in_flight);

        let mut used_fallback = false;
        let detail = match self.classifier.classify(text) {
            Ok(Some(raw)) => match AiClassification::parse(&raw) {
                Ok(c) => {
                    self.log_classified(&c);
                    c.into_detail()
                }
                Err(e) => {
                    // 解析不能は OTHER へ劣化し、成功として続行する
                    self.log_degraded(&e.to_string());
                    AiClassification::other().into_detail()
                }
            },
            Ok(None) => {
                self.log_degraded("response carried no text part");
                AiClassification::other().into_detail()
            }
            Err(e) if e.is_config() => {
                used_fallback = true;
                let category = fallback_classify(text);
                self.log_fallback(category, &e);
                ThoughtDetail::bare(category)
            }
            Err(e) => {
                self.log_error(&e);
                return Err(e);
            }
        };

        let thought = Thought {
            id: self.id_gen.next_id(),
            content: text.to_string(),
            timestamp: self.clock.now_ms(),
            detail,
            mood,
        };

        // 警告フラグの更新・追加・保存は同じロック区間で行う（途中状態を残さない）
        let mut state = self.state();
        if used_fallback && !state.key_warning_shown {
            self.notice.notify(KEY_WARNING);
            state.key_warning_shown = true;
        }
        state.push_front(thought.clone());
        self.storage.save(&state)?;
        Ok(thought)
    }

    /// 一覧（新しい順）。カテゴリ・気分の有無で絞り込める
    pub fn list(&self, category: Option<ThoughtCategory>, mood_only: bool) -> Vec<Thought> {
        self.state()
            .thoughts
            .iter()
            .filter(|t| category.map_or(true, |c| t.category() == c))
            .filter(|t| !mood_only || t.mood.is_some())
            .cloned()
            .collect()
    }

    /// TODO の完了状態を反転し、新しい値を返す
    pub fn toggle_completed(&self, id: &ThoughtId) -> Result<bool, Error> {
        let mut state = self.state();
        let completed = state.toggle_completed(id)?;
        self.storage.save(&state)?;
        Ok(completed)
    }

    /// id で削除する（存在しなければ何もしない）。削除したかを返す
    pub fn delete(&self, id: &ThoughtId) -> Result<bool, Error> {
        let mut state = self.state();
        if !state.delete(id) {
            return Ok(false);
        }
        self.storage.save(&state)?;
        Ok(true)
    }

    /// カテゴリ別・気分別の集計
    pub fn stats(&self) -> CategoryCounts {
        self.state().counts()
    }

    fn log_classified(&self, c: &AiClassification) {
        let mut fields = BTreeMap::new();
        fields.insert("category".to_string(), serde_json::json!(c.category.as_str()));
        if let Some(ref refined) = c.refined_task {
            fields.insert("refinedTask".to_string(), serde_json::json!(refined));
        }
        if let Some(ref title) = c.suggested_task_title {
            fields.insert("suggestedTaskTitle".to_string(), serde_json::json!(title));
        }
        self.log(LogLevel::Info, "thought classified", "classify", Some(fields));
    }

    fn log_degraded(&self, reason: &str) {
        let mut fields = BTreeMap::new();
        fields.insert("reason".to_string(), serde_json::json!(reason));
        fields.insert("category".to_string(), serde_json::json!("OTHER"));
        self.log(
            LogLevel::Warn,
            "classification response unusable; degraded to OTHER",
            "classify",
            Some(fields),
        );
    }

    fn log_fallback(&self, category: ThoughtCategory, cause: &Error) {
        let mut fields = BTreeMap::new();
        fields.insert("category".to_string(), serde_json::json!(category.as_str()));
        fields.insert("cause".to_string(), serde_json::json!(cause.to_string()));
        self.log(
            LogLevel::Warn,
            "classifier not configured; used keyword fallback",
            "fallback",
            Some(fields),
        );
    }

    fn log_error(&self, e: &Error) {
        self.log(LogLevel::Error, &e.to_string(), "error", None);
    }

    fn log(
        &self,
        level: LogLevel,
        message: &str,
        kind: &str,
        fields: Option<BTreeMap<String, serde_json::Value>>,
    ) {
        let _ = self.logger.log(&LogRecord {
            ts: now_iso8601(),
            level,
            message: message.to_string(),
            layer: Some("usecase".to_string()),
            kind: Some(kind.to_string()),
            fields,
        });
    }
}
