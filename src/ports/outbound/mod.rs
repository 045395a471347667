//! Outbound ポート: usecase が外界（分類サービス・FS・時刻・ログ・通知）を使うための trait 群

pub mod classifier;
pub mod clock;
pub mod fs;
pub mod id_generator;
pub mod log;
pub mod notice;
pub mod state_storage;

pub use classifier::ThoughtClassifier;
pub use clock::Clock;
pub use fs::FileSystem;
pub use id_generator::IdGenerator;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use notice::Notice;
pub use state_storage::StateStorage;
