//! Catalog table listing for the startup summary

use discog_common::db::CATALOG_TABLES;
use serde::Serialize;
use sqlx::SqlitePool;

/// Table metadata
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub name: String,
    /// `None` when the table is missing from the database
    pub row_count: Option<i64>,
}

/// Row counts for every table the catalog queries read
///
/// Missing tables are reported with `row_count: None` rather than failing, so
/// the caller can warn about an incomplete database.
pub async fn list_catalog_tables(pool: &SqlitePool) -> Result<Vec<TableInfo>, sqlx::Error> {
    let existing: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut infos = Vec::with_capacity(CATALOG_TABLES.len());

    for table in CATALOG_TABLES {
        let row_count = if existing.iter().any(|(name,)| name == table) {
            // Table names come from a fixed list, never from input
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(pool)
                .await?;
            Some(count)
        } else {
            None
        };

        infos.push(TableInfo {
            name: table.to_string(),
            row_count,
        });
    }

    Ok(infos)
}
