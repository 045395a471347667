//! 分類のフォールバック規則
//!
//! リモート分類が設定不備で使えないときの決定的なオフライン分類。
//! 固定キーワードの部分一致を優先順に評価する（先勝ち、スコアリングなし）。

use crate::domain::thought::ThoughtCategory;

/// 回想・後悔・不安の指標
const TRAUMA_KEYWORDS: &[&str] = &["想起", "后悔", "担心", "害怕"];
/// 行動・作成・準備・計画の指標
const TODO_KEYWORDS: &[&str] = &["完成", "写", "做", "准备", "计划"];
/// 発想・着想の指標
const CREATIVE_KEYWORDS: &[&str] = &["设计", "创意", "想法", "灵感"];

/// キーワード一致でカテゴリを決める
///
/// 大文字小文字を区別しない。どの集合にも当たらなければ OTHER。
pub fn fallback_classify(text: &str) -> ThoughtCategory {
    let lower = text.to_lowercase();
    if TRAUMA_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ThoughtCategory::Trauma;
    }
    if TODO_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ThoughtCategory::Todo;
    }
    if CREATIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ThoughtCategory::Creative;
    }
    ThoughtCategory::Other
}
