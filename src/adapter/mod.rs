//! Adapter（ポートの標準実装）

pub mod console_notice;
pub mod data_dir;
pub mod file_json_log;
pub mod file_state_storage;
pub mod gemini;
pub mod std_clock;
pub mod std_fs;
pub mod std_id_generator;

pub use console_notice::ConsoleNotice;
pub use data_dir::resolve_data_dir;
pub use file_json_log::{FileJsonLog, NoopLog};
pub use file_state_storage::FileStateStorage;
pub use gemini::GeminiClassifier;
pub use std_clock::StdClock;
pub use std_fs::StdFileSystem;
pub use std_id_generator::StdIdGenerator;
