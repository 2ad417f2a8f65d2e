//! # NextUp Core
//!
//! Engine of the NextUp streaming aggregator: mirrors a remote
//! movie/show-availability catalog into a local SQLite database for
//! offline browsing and deep-linking.
//!
//! The crate is organized into a few modules:
//!
//! - [`remote`]: paginated catalog client with bounded-backoff retry
//! - [`mappers`]: pure DTO-to-entity transforms
//! - [`database`]: SQLite store with per-entity upsert repositories
//! - [`sync`]: the library sync orchestrator and top-shows reconciliation
//! - [`config`]: environment-driven configuration

pub mod config;
pub mod database;
pub mod error;
pub mod mappers;
pub mod remote;
pub mod sync;

pub use config::{ConfigError, DatabaseConfig, RemoteConfig, SyncConfig};
pub use error::{Result, SyncError};
pub use remote::{CatalogClient, CatalogPage, CatalogSource, RemoteError, RetryPolicy};
pub use sync::{LibrarySync, SyncReport, TitleFailure};
