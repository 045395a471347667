//! 利用者向け通知 Outbound ポート
//!
//! 構造化ログ（ファイル）とは別の、人間に直接見せる 1 行メッセージの経路。
//! 今のところ設定エラー時の一度きり警告にだけ使う。

/// 利用者向けの通知を表示する抽象
///
/// 実装は `adapter::ConsoleNotice`（stderr へ出力）やテスト用の記録スタブなど。
pub trait Notice: Send + Sync {
    fn notify(&self, message: &str);
}
