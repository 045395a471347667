//! エラーハンドリング
//!
//! クレート全体で共有するエラー型。種別とメッセージを持ち、
//! main で sysexits 風の終了コードに変換する。

/// クレート共通のエラー型
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// 資格情報の欠落・プレースホルダ（パイプラインはフォールバック分類へ切り替える）
    #[error("{0}")]
    Config(String),
    /// リモート呼び出しの失敗（ネットワーク・非 2xx・クォータ等）
    #[error("{0}")]
    Http(String),
    /// JSON の生成・解析失敗
    #[error("{0}")]
    Json(String),
    /// ファイル I/O の失敗
    #[error("{0}")]
    Io(String),
    /// 入力検証エラー（空入力・対象外の操作・引数不正）
    #[error("{0}")]
    Validation(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// 設定エラーか（パイプラインのフォールバック判定に使う）
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// sysexits 風の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => 64,
            Error::Json(_) => 65,
            Error::Http(_) => 69,
            Error::Io(_) => 74,
            Error::Config(_) => 78,
        }
    }
}
