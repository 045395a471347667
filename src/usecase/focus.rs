//! 集中時間の積算ユースケース
//!
//! 積算値はセッション状態の一部（独立したファイル）。変更のたびに保存する。

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::state::SessionState;
use crate::error::Error;
use crate::ports::outbound::StateStorage;

/// 累計集中秒数の読み書き
pub struct FocusUseCase {
    state: Arc<Mutex<SessionState>>,
    storage: Arc<dyn StateStorage>,
}

impl FocusUseCase {
    pub fn new(state: Arc<Mutex<SessionState>>, storage: Arc<dyn StateStorage>) -> Self {
        Self { state, storage }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 経過秒を積算して保存し、新しい累計を返す
    pub fn record_seconds(&self, secs: u64) -> Result<u64, Error> {
        if secs == 0 {
            return Ok(self.total_secs());
        }
        let mut state = self.state();
        state.total_focus_secs += secs;
        self.storage.save(&state)?;
        Ok(state.total_focus_secs)
    }

    /// 現在の累計集中秒数
    pub fn total_secs(&self) -> u64 {
        self.state().total_focus_secs
    }
}
