//! Database access layer for discog-api
//!
//! All connections are read-only. The pool is opened lazily, so an unreachable
//! database is reported per request as a connection error instead of stopping
//! the service at startup.

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::path::Path;

use crate::error::ApiError;

pub mod queries;
mod tables;

pub use tables::{list_catalog_tables, TableInfo};

/// Open a read-only pool on the catalog database
///
/// No connection is made here; the first `acquire` opens one.
pub fn connect_readonly(db_path: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new().connect_lazy_with(options)
}

/// Check out a connection for the duration of one request
///
/// The connection goes back to the pool when the returned guard is dropped.
pub async fn acquire(pool: &SqlitePool) -> Result<PoolConnection<Sqlite>, ApiError> {
    pool.acquire().await.map_err(ApiError::Connection)
}
