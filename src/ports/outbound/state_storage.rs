//! セッション状態の永続化 Outbound ポート
//!
//! 起動時に 1 度 load し、以後は変更のたびに save する（バッチ化しない）。
//! 保存先・形式はアダプタの選択に委ねる。

use crate::domain::state::SessionState;
use crate::error::Error;

/// SessionState 全体を読み書きする抽象
///
/// 実装は `adapter::FileStateStorage`。save は前回値に対して
/// all-or-nothing であること（途中まで書けた状態を残さない）。
pub trait StateStorage: Send + Sync {
    fn load(&self) -> Result<SessionState, Error>;
    fn save(&self, state: &SessionState) -> Result<(), Error>;
}
