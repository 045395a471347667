//! データディレクトリの解決（環境変数）
//!
//! MINDGLOW_HOME → $XDG_DATA_HOME/mindglow → $HOME/.local/share/mindglow の順。

use crate::error::Error;
use std::env;
use std::path::PathBuf;

/// 永続状態とログを置くディレクトリを決める
pub fn resolve_data_dir() -> Result<PathBuf, Error> {
    if let Ok(home) = env::var("MINDGLOW_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    let data_base = env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|h| PathBuf::from(h).join(".local").join("share"))
        })
        .ok_or_else(|| Error::config("HOME is not set"))?;

    Ok(data_base.join("mindglow"))
}
