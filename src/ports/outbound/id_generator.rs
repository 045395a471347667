//! ID 生成 Outbound ポート
//!
//! usecase は IdGenerator を注入し、テストでは連番を返す実装を渡せる。

use crate::domain::thought::ThoughtId;

/// ThoughtId を生成する抽象
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ThoughtId;
}
