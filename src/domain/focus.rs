//! 集中タイマーのドメイン
//!
//! 1 秒刻みのカウントダウン状態機械。経過秒の積算（永続化）は
//! usecase 側の責務で、ここは純粋な状態遷移だけを持つ。

/// 1 セッションの既定長（25 分）
pub const FOCUS_SESSION_SECS: u32 = 25 * 60;

/// tick() の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 停止中（または残りゼロ）。時間は進んでいない
    Idle,
    /// 1 秒進んだ
    Ticked { remaining: u32 },
    /// この tick で 0 に到達し、タイマーは停止した
    Finished,
}

/// カウントダウンタイマー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    initial: u32,
    remaining: u32,
    running: bool,
}

impl FocusTimer {
    pub fn new(secs: u32) -> Self {
        Self {
            initial: secs,
            remaining: secs,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if self.remaining > 0 {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// 停止して残り時間を初期値に戻す
    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.running = false;
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 1 秒進める。0 に達したら自動停止する
    pub fn tick(&mut self) -> Tick {
        if !self.running || self.remaining == 0 {
            return Tick::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.running = false;
            return Tick::Finished;
        }
        Tick::Ticked {
            remaining: self.remaining,
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(FOCUS_SESSION_SECS)
    }
}

/// 秒数を "2h 5m" / "17m" 形式にする
pub fn format_duration(secs: u64) -> String {
    let hrs = secs / 3600;
    let mins = (secs % 3600) / 60;
    if hrs > 0 {
        format!("{}h {}m", hrs, mins)
    } else {
        format!("{}m", mins)
    }
}
