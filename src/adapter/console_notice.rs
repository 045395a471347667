//! stderr へ利用者向け通知を出す Notice 実装

use crate::ports::outbound::Notice;

/// stderr に 1 行出す Notice 実装
///
/// stdout はコマンドの出力（一覧・集計など）専用なので使わない。
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotice;

impl Notice for ConsoleNotice {
    fn notify(&self, message: &str) {
        eprintln!("mindglow: {}", message);
    }
}
