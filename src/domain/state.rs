//! セッション状態（ストア本体）
//!
//! thoughts は新しい順の 1 本のコレクション。集計はその場で数え直す
//! （この規模では増分維持は要らない）。保存形式は StateStorage アダプタが決める。

use crate::domain::thought::{Thought, ThoughtCategory, ThoughtDetail, ThoughtId};
use crate::error::Error;

/// カテゴリ別・気分別の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    /// TRAUMA（愈心）
    pub healing: usize,
    pub todo: usize,
    pub creative: usize,
    pub other: usize,
    pub uncategorized: usize,
    /// 気分が記録されている件数
    pub moods: usize,
}

/// セッション 1 本分の永続状態
///
/// 3 つの値は独立したライフサイクルを持つ（thoughts・累計集中秒数・
/// 設定警告の表示済みフラグ）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// 新しい順
    pub thoughts: Vec<Thought>,
    pub total_focus_secs: u64,
    /// 設定エラーの一度きり警告を出したか
    pub key_warning_shown: bool,
}

impl SessionState {
    /// 先頭（最新）に追加する。パイプラインだけが呼ぶ
    pub fn push_front(&mut self, thought: Thought) {
        self.thoughts.insert(0, thought);
    }

    /// id で削除する。存在しなければ何もしない（冪等）
    pub fn delete(&mut self, id: &ThoughtId) -> bool {
        let before = self.thoughts.len();
        self.thoughts.retain(|t| &t.id != id);
        self.thoughts.len() != before
    }

    /// TODO 項目の完了状態を反転し、新しい値を返す
    ///
    /// 未知の id、および TODO 以外への操作は Validation エラー。
    pub fn toggle_completed(&mut self, id: &ThoughtId) -> Result<bool, Error> {
        let thought = self
            .thoughts
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| Error::validation(format!("No thought with id: {}", id)))?;
        match &mut thought.detail {
            ThoughtDetail::Todo { is_completed } => {
                *is_completed = !*is_completed;
                Ok(*is_completed)
            }
            _ => Err(Error::validation(format!(
                "Thought {} is {}, not TODO; completion does not apply",
                id,
                thought.category()
            ))),
        }
    }

    pub fn get(&self, id: &ThoughtId) -> Option<&Thought> {
        self.thoughts.iter().find(|t| &t.id == id)
    }

    /// カテゴリで絞り込む（新しい順のまま）
    pub fn by_category(&self, category: ThoughtCategory) -> Vec<&Thought> {
        self.thoughts
            .iter()
            .filter(|t| t.category() == category)
            .collect()
    }

    /// 気分が記録されたものだけ（新しい順のまま）
    pub fn with_mood(&self) -> Vec<&Thought> {
        self.thoughts.iter().filter(|t| t.mood.is_some()).collect()
    }

    /// その場で数え直す集計
    pub fn counts(&self) -> CategoryCounts {
        let mut c = CategoryCounts::default();
        for t in &self.thoughts {
            match t.category() {
                ThoughtCategory::Trauma => c.healing += 1,
                ThoughtCategory::Todo => c.todo += 1,
                ThoughtCategory::Creative => c.creative += 1,
                ThoughtCategory::Other => c.other += 1,
                ThoughtCategory::Uncategorized => c.uncategorized += 1,
            }
            if t.mood.is_some() {
                c.moods += 1;
            }
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::thought::Mood;

    fn thought(id: &str, detail: ThoughtDetail, mood: Option<Mood>) -> Thought {
        Thought {
            id: ThoughtId::new(id),
            content: format!("content-{}", id),
            timestamp: 1,
            detail,
            mood,
        }
    }

    #[test]
    fn test_push_front_keeps_newest_first() {
        let mut s = SessionState::default();
        s.push_front(thought("a", ThoughtDetail::bare(ThoughtCategory::Other), None));
        s.push_front(thought("b", ThoughtDetail::bare(ThoughtCategory::Other), None));
        let ids: Vec<&str> = s.thoughts.iter().map(|t| &*t.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut s = SessionState::default();
        s.push_front(thought("a", ThoughtDetail::bare(ThoughtCategory::Other), None));
        assert!(s.delete(&ThoughtId::new("a")));
        let snapshot = s.clone();
        assert!(!s.delete(&ThoughtId::new("a")));
        assert!(!s.delete(&ThoughtId::new("missing")));
        assert_eq!(s, snapshot);
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut s = SessionState::default();
        s.push_front(thought("t", ThoughtDetail::bare(ThoughtCategory::Todo), None));
        let id = ThoughtId::new("t");
        assert!(s.toggle_completed(&id).unwrap());
        assert!(!s.toggle_completed(&id).unwrap());
        assert!(!s.get(&id).unwrap().is_completed());
    }

    #[test]
    fn test_toggle_rejects_non_todo() {
        let mut s = SessionState::default();
        s.push_front(thought("c", ThoughtDetail::bare(ThoughtCategory::Creative), None));
        let err = s.toggle_completed(&ThoughtId::new("c")).unwrap_err();
        assert!(err.to_string().contains("not TODO"));
    }

    #[test]
    fn test_toggle_rejects_unknown_id() {
        let mut s = SessionState::default();
        assert!(s.toggle_completed(&ThoughtId::new("ghost")).is_err());
    }

    #[test]
    fn test_counts_and_filters() {
        let mut s = SessionState::default();
        s.push_front(thought(
            "1",
            ThoughtDetail::bare(ThoughtCategory::Trauma),
            Some(Mood::Stormy),
        ));
        s.push_front(thought("2", ThoughtDetail::bare(ThoughtCategory::Todo), None));
        s.push_front(thought(
            "3",
            ThoughtDetail::bare(ThoughtCategory::Creative),
            Some(Mood::Sunny),
        ));
        s.push_front(thought("4", ThoughtDetail::bare(ThoughtCategory::Other), None));

        let c = s.counts();
        assert_eq!(
            (c.healing, c.todo, c.creative, c.other, c.uncategorized, c.moods),
            (1, 1, 1, 1, 0, 2)
        );
        assert_eq!(s.by_category(ThoughtCategory::Todo).len(), 1);
        let mood_ids: Vec<&str> = s.with_mood().iter().map(|t| &*t.id).collect();
        assert_eq!(mood_ids, vec!["3", "1"]);
    }
}
