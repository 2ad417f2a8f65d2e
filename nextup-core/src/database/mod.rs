//! SQLite store: connection setup, migrations, per-entity repositories.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

use crate::error::Result;

pub mod repositories;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open (creating if necessary) the catalog database at `path`, apply
/// pending migrations, and hand back the pool.
///
/// The pool is the store handle: construct it once at startup and inject
/// it wherever writes happen. Deployments that ship a pre-built snapshot
/// just copy the file into place before calling this.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::error::SyncError::Internal(format!(
                    "failed to create database directory {}: {e}",
                    parent.display()
                )))?;
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .map_err(crate::error::SyncError::Database)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    // SQLite permits a single writer at a time; one connection sidesteps
    // "database is locked" failures during long sync transactions.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    info!(path = %path.display(), "catalog database ready");
    Ok(pool)
}
