//! セッション状態をデータディレクトリの JSON ファイルに保存・読み込みするアダプタ
//!
//! 3 つの値（thoughts・累計集中秒数・警告フラグ）はライフサイクルが独立なので
//! ファイルも分ける。書き込みは .tmp へ書いてから rename するので、
//! 失敗しても前回の内容が壊れることはない。

use crate::domain::state::SessionState;
use crate::domain::thought::Thought;
use crate::error::Error;
use crate::ports::outbound::{FileSystem, StateStorage};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const THOUGHTS_FILENAME: &str = "thoughts.json";
const TOTAL_FOCUS_FILENAME: &str = "total_focus.json";
const KEY_WARNING_FILENAME: &str = "key_warning.json";

/// データディレクトリ配下の JSON ファイルで SessionState を永続化する実装
pub struct FileStateStorage {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileStateStorage {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 存在しなければ default、あれば JSON として読む
    fn read_or<T: DeserializeOwned>(&self, filename: &str, default: T) -> Result<T, Error> {
        let path = self.dir.join(filename);
        if !self.fs.exists(&path) {
            return Ok(default);
        }
        let s = self.fs.read_to_string(&path)?;
        serde_json::from_str(&s)
            .map_err(|e| Error::json(format!("Failed to parse '{}': {}", path.display(), e)))
    }

    /// .tmp へ書いてから rename で置き換える
    fn write_atomic(&self, filename: &str, contents: &str) -> Result<(), Error> {
        self.fs.create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!("{}.tmp", filename));
        let dst = self.dir.join(filename);
        self.fs.write(&tmp, contents)?;
        self.fs.rename(&tmp, &dst)
    }
}

impl StateStorage for FileStateStorage {
    fn load(&self) -> Result<SessionState, Error> {
        let thoughts: Vec<Thought> = self.read_or(THOUGHTS_FILENAME, Vec::new())?;
        let total_focus_secs: u64 = self.read_or(TOTAL_FOCUS_FILENAME, 0)?;
        let key_warning_shown: bool = self.read_or(KEY_WARNING_FILENAME, false)?;
        Ok(SessionState {
            thoughts,
            total_focus_secs,
            key_warning_shown,
        })
    }

    fn save(&self, state: &SessionState) -> Result<(), Error> {
        let thoughts =
            serde_json::to_string(&state.thoughts).map_err(|e| Error::json(e.to_string()))?;
        self.write_atomic(THOUGHTS_FILENAME, &thoughts)?;
        self.write_atomic(TOTAL_FOCUS_FILENAME, &state.total_focus_secs.to_string())?;
        let flag = if state.key_warning_shown {
            "true"
        } else {
            "false"
        };
        self.write_atomic(KEY_WARNING_FILENAME, flag)
    }
}
