//! UseCase（オーケストレーション層）

pub mod focus;
pub mod journal;

pub use focus::FocusUseCase;
pub use journal::JournalUseCase;
