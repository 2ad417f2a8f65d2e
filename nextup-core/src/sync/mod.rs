//! Library sync orchestration: pagination, per-title transactions, and
//! top-shows reconciliation.

pub mod library;
pub mod report;

pub use library::LibrarySync;
pub use report::{SyncReport, TitleFailure};
