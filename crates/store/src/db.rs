//! Database connection management.

use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Handle to the bibliography database.
///
/// Resolution is strictly sequential, so the pool holds exactly one
/// connection for the lifetime of the handle. Call [`close`](Self::close)
/// when done; dropping the handle without closing leaves the connection to
/// be torn down by the runtime.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions, origin: PathBuf) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            // An in-memory database vanishes with its connection.
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Connect(origin))?;
        Ok(Self { pool })
    }

    /// Open the database at the given path in read-only mode.
    ///
    /// The file must already exist; it is never created.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new().filename(path).read_only(true).create_if_missing(false);
        let db = Self::new(options, path.to_path_buf()).await?;
        tracing::debug!("database opened");
        Ok(db)
    }

    /// Connect to an empty, writable in-memory database.
    ///
    /// Note:
    /// - In-memory databases are destroyed when the connection closes.
    /// - Do NOT apply `#[cfg(test)]` so that other crates can also use this in their tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(":memory:");
        Self::new(options, PathBuf::from(":memory:")).await
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection.
    ///
    /// After calling this, the Database instance (and any repository built
    /// from it) should not be used.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("database closed");
    }
}
