//! 念頭（Thought）のドメイン型
//!
//! 1 件の記録は共通フィールド + カテゴリごとの付随情報（タグ付きバリアント）。
//! シリアライズ形式は旧ストア（localStorage 形式の camelCase フラット JSON）と
//! 相互変換できるようにしてある。

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Thought の一意 ID（base62、辞書順＝時系列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThoughtId(String);

impl ThoughtId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ThoughtId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ThoughtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ThoughtId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// 記録時に自己申告する気分（心の天気）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sunny,
    Rainy,
    Cloudy,
    Windy,
    Stormy,
    Misty,
}

impl Mood {
    pub const ALL: &'static [Mood] = &[
        Mood::Sunny,
        Mood::Rainy,
        Mood::Cloudy,
        Mood::Windy,
        Mood::Stormy,
        Mood::Misty,
    ];

    /// シリアライズ名（小文字）
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Sunny => "sunny",
            Mood::Rainy => "rainy",
            Mood::Cloudy => "cloudy",
            Mood::Windy => "windy",
            Mood::Stormy => "stormy",
            Mood::Misty => "misty",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown mood '{}'. Expected one of: sunny, rainy, cloudy, windy, stormy, misty",
                    s
                ))
            })
    }
}

/// 分類カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThoughtCategory {
    Trauma,
    Todo,
    Creative,
    Other,
    Uncategorized,
}

impl ThoughtCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThoughtCategory::Trauma => "TRAUMA",
            ThoughtCategory::Todo => "TODO",
            ThoughtCategory::Creative => "CREATIVE",
            ThoughtCategory::Other => "OTHER",
            ThoughtCategory::Uncategorized => "UNCATEGORIZED",
        }
    }
}

impl std::fmt::Display for ThoughtCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThoughtCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRAUMA" => Ok(ThoughtCategory::Trauma),
            "TODO" => Ok(ThoughtCategory::Todo),
            "CREATIVE" => Ok(ThoughtCategory::Creative),
            "OTHER" => Ok(ThoughtCategory::Other),
            "UNCATEGORIZED" => Ok(ThoughtCategory::Uncategorized),
            _ => Err(Error::validation(format!(
                "Unknown category '{}'. Expected one of: TRAUMA, TODO, CREATIVE, OTHER, UNCATEGORIZED",
                s
            ))),
        }
    }
}

/// 書籍のおすすめ（TRAUMA 分類に付く）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecommendation {
    pub title: String,
    pub author: String,
    pub reason: String,
}

/// カテゴリごとの付随情報
///
/// serde のタグは "category"。Thought に flatten すると
/// `{"category":"TRAUMA","aiAdvice":...}` のフラットな形になる。
/// isCompleted は TODO バリアントにしか存在しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum ThoughtDetail {
    #[serde(rename = "TRAUMA")]
    Trauma {
        #[serde(rename = "aiAdvice", default, skip_serializing_if = "Option::is_none")]
        ai_advice: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        books: Option<Vec<BookRecommendation>>,
    },
    #[serde(rename = "TODO")]
    Todo {
        #[serde(rename = "isCompleted", default)]
        is_completed: bool,
    },
    #[serde(rename = "CREATIVE")]
    Creative {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
        #[serde(rename = "aiAdvice", default, skip_serializing_if = "Option::is_none")]
        ai_advice: Option<String>,
    },
    #[serde(rename = "OTHER")]
    Other {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sentiment: Option<String>,
    },
    #[serde(rename = "UNCATEGORIZED")]
    Uncategorized,
}

impl ThoughtDetail {
    /// 対応するカテゴリ
    pub fn category(&self) -> ThoughtCategory {
        match self {
            ThoughtDetail::Trauma { .. } => ThoughtCategory::Trauma,
            ThoughtDetail::Todo { .. } => ThoughtCategory::Todo,
            ThoughtDetail::Creative { .. } => ThoughtCategory::Creative,
            ThoughtDetail::Other { .. } => ThoughtCategory::Other,
            ThoughtDetail::Uncategorized => ThoughtCategory::Uncategorized,
        }
    }

    /// 付随情報なしのバリアント（フォールバック分類の結果用）
    pub fn bare(category: ThoughtCategory) -> Self {
        match category {
            ThoughtCategory::Trauma => ThoughtDetail::Trauma {
                ai_advice: None,
                books: None,
            },
            ThoughtCategory::Todo => ThoughtDetail::Todo {
                is_completed: false,
            },
            ThoughtCategory::Creative => ThoughtDetail::Creative {
                tags: None,
                ai_advice: None,
            },
            ThoughtCategory::Other => ThoughtDetail::Other { sentiment: None },
            ThoughtCategory::Uncategorized => ThoughtDetail::Uncategorized,
        }
    }
}

/// 記録された 1 件の念頭
///
/// id / content / timestamp / カテゴリは作成後に変化しない。
/// 変化するのは TODO の isCompleted だけ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub id: ThoughtId,
    pub content: String,
    /// 作成時刻（Unix epoch ミリ秒）
    pub timestamp: u64,
    #[serde(flatten)]
    pub detail: ThoughtDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl Thought {
    pub fn category(&self) -> ThoughtCategory {
        self.detail.category()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.detail, ThoughtDetail::Todo { is_completed: true })
    }
}
