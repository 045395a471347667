//! ファイルシステム Outbound ポート
//!
//! adapter（永続化・ログ）はこの trait 経由でのみファイル I/O を行う。

use std::path::Path;

use crate::error::Error;

/// ファイルシステム抽象
///
/// 実装は `adapter::StdFileSystem`。この crate が行う操作だけに絞ってある。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    /// 同一ディレクトリ内の rename（アトミック置換に使う）
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
    fn exists(&self, path: &Path) -> bool;
}
