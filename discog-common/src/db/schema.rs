//! Catalog table definitions
//!
//! The API only ever reads these tables. The DDL is kept here so fixtures and
//! local seeding build exactly the layout the catalog queries expect.

use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Tables the catalog queries read, in creation order
pub const CATALOG_TABLES: &[&str] = &["albums", "songs", "integrants"];

pub async fn create_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            year INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY,
            album_id INTEGER NOT NULL REFERENCES albums(id),
            name TEXT NOT NULL,
            track_number INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_album ON songs(album_id, track_number)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Band members; `end_year` is NULL while the member is still active
pub async fn create_integrants_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS integrants (
            name TEXT NOT NULL,
            instrument TEXT NOT NULL,
            start_year INTEGER NOT NULL,
            end_year INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create every catalog table that does not exist yet
pub async fn create_catalog_tables(pool: &SqlitePool) -> Result<()> {
    create_albums_table(pool).await?;
    create_songs_table(pool).await?;
    create_integrants_table(pool).await?;
    debug!("Catalog tables ready: {}", CATALOG_TABLES.join(", "));
    Ok(())
}
