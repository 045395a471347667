//! mindglow コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の Runner が match でディスパッチする。

use crate::domain::thought::{Mood, ThoughtCategory};

/// mindglow のサブコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// ヘルプ表示（サブコマンド未指定時も）
    Help,

    /// 念頭を分類して記録する
    Capture { text: String, mood: Option<Mood> },

    /// 記録の一覧表示（カテゴリ・気分で絞り込み）
    List {
        category: Option<ThoughtCategory>,
        mood_only: bool,
    },

    /// TODO の完了状態を切り替える
    Toggle { id: String },

    /// 記録を削除する
    Delete { id: String },

    /// カテゴリ・気分の集計を表示する
    Stats,

    /// カウントダウンを実行して集中時間を積算する
    FocusRun { minutes: u32 },

    /// 累計集中時間を表示する
    FocusTotal,
}
