//! 分類サービス Outbound ポート
//!
//! usecase はこの trait 経由でのみリモート分類を呼ぶ。

use crate::error::Error;

/// 念頭をリモート分類するサービスの抽象
///
/// 実装は `adapter::GeminiClassifier` やテスト用のスタブなど。
/// 戻り値はモデルの生の応答テキスト（text part の無い応答は None）。
/// JSON としての解析と「解析不能 → OTHER」の劣化判断はパイプライン側で行う。
pub trait ThoughtClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Option<String>, Error>;
}
