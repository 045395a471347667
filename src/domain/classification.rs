//! リモート分類結果（一時型）
//!
//! サービスの応答テキストをベストエフォートで解析する。スキーマはサービスに
//! 宣言するだけで保証はされないため、解析失敗は呼び出し側（パイプライン）が
//! 明示的な分岐で劣化結果 `other()` へ落とす。

use serde::Deserialize;

use crate::domain::thought::{BookRecommendation, ThoughtCategory, ThoughtDetail};
use crate::error::Error;

/// 分類サービスの応答
///
/// category 以外はすべて任意。refinedTask / suggestedTaskTitle は
/// Thought には載せない（ログにのみ残す）。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiClassification {
    pub category: ThoughtCategory,
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub books: Option<Vec<BookRecommendation>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub refined_task: Option<String>,
    #[serde(default)]
    pub suggested_task_title: Option<String>,
}

impl AiClassification {
    /// 応答テキストを JSON として解析する
    pub fn parse(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text.trim())
            .map_err(|e| Error::json(format!("Failed to parse classification response: {}", e)))
    }

    /// 解析不能時の劣化結果（OTHER のみ、付随情報なし）
    pub fn other() -> Self {
        Self {
            category: ThoughtCategory::Other,
            advice: None,
            books: None,
            tags: None,
            sentiment: None,
            refined_task: None,
            suggested_task_title: None,
        }
    }

    /// カテゴリに応じた付随情報へ変換する
    ///
    /// 対象カテゴリに関係ないフィールドはここで捨てる。
    pub fn into_detail(self) -> ThoughtDetail {
        match self.category {
            ThoughtCategory::Trauma => ThoughtDetail::Trauma {
                ai_advice: self.advice,
                books: self.books,
            },
            ThoughtCategory::Todo => ThoughtDetail::Todo {
                is_completed: false,
            },
            ThoughtCategory::Creative => ThoughtDetail::Creative {
                tags: self.tags,
                ai_advice: self.advice,
            },
            ThoughtCategory::Other => ThoughtDetail::Other {
                sentiment: self.sentiment,
            },
            ThoughtCategory::Uncategorized => ThoughtDetail::Uncategorized,
        }
    }
}
