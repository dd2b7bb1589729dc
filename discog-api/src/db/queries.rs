//! Catalog queries
//!
//! Each function runs exactly one parameterized statement on the request's
//! connection and returns typed rows in the statement's `ORDER BY` order.
//! Album queries LEFT JOIN songs so albums without songs still produce a row.

use discog_common::{AlbumSongRow, IntegrantRow, SongLookupRow};
use sqlx::SqliteConnection;

/// Every album with its songs, oldest album first
pub async fn all_album_rows(conn: &mut SqliteConnection) -> Result<Vec<AlbumSongRow>, sqlx::Error> {
    sqlx::query_as::<_, AlbumSongRow>(
        r#"
        SELECT a.id AS album_id, a.name AS album_name, a.year,
               s.name AS song_name, s.track_number
        FROM albums a
        LEFT JOIN songs s ON a.id = s.album_id
        ORDER BY a.year, a.id, s.track_number
        "#,
    )
    .fetch_all(conn)
    .await
}

/// Rows for every album with the given name
pub async fn album_rows_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Vec<AlbumSongRow>, sqlx::Error> {
    sqlx::query_as::<_, AlbumSongRow>(
        r#"
        SELECT a.id AS album_id, a.name AS album_name, a.year,
               s.name AS song_name, s.track_number
        FROM albums a
        LEFT JOIN songs s ON a.id = s.album_id
        WHERE a.name = ?
        ORDER BY a.year, a.id, s.track_number
        "#,
    )
    .bind(name)
    .fetch_all(conn)
    .await
}

pub async fn album_rows_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Vec<AlbumSongRow>, sqlx::Error> {
    sqlx::query_as::<_, AlbumSongRow>(
        r#"
        SELECT a.id AS album_id, a.name AS album_name, a.year,
               s.name AS song_name, s.track_number
        FROM albums a
        LEFT JOIN songs s ON a.id = s.album_id
        WHERE a.id = ?
        ORDER BY s.track_number
        "#,
    )
    .bind(id)
    .fetch_all(conn)
    .await
}

pub async fn album_rows_by_year(
    conn: &mut SqliteConnection,
    year: i64,
) -> Result<Vec<AlbumSongRow>, sqlx::Error> {
    sqlx::query_as::<_, AlbumSongRow>(
        r#"
        SELECT a.id AS album_id, a.name AS album_name, a.year,
               s.name AS song_name, s.track_number
        FROM albums a
        LEFT JOIN songs s ON a.id = s.album_id
        WHERE a.year = ?
        ORDER BY a.id, s.track_number
        "#,
    )
    .bind(year)
    .fetch_all(conn)
    .await
}

/// Names of songs released on albums of the given year
pub async fn song_names_by_year(
    conn: &mut SqliteConnection,
    year: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT s.name
        FROM songs s
        JOIN albums a ON s.album_id = a.id
        WHERE a.year = ?
        ORDER BY a.id, s.track_number
        "#,
    )
    .bind(year)
    .fetch_all(conn)
    .await
}

/// First song with the given name
///
/// Song names are not unique in the store. When several match, the one on the
/// earliest album (by year, then album id, then track) wins.
pub async fn song_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<SongLookupRow>, sqlx::Error> {
    sqlx::query_as::<_, SongLookupRow>(
        r#"
        SELECT s.name AS song_name, s.track_number,
               a.name AS album_name, a.year
        FROM songs s
        JOIN albums a ON s.album_id = a.id
        WHERE s.name = ?
        ORDER BY a.year, a.id, s.track_number
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await
}

pub async fn integrant_rows(conn: &mut SqliteConnection) -> Result<Vec<IntegrantRow>, sqlx::Error> {
    sqlx::query_as::<_, IntegrantRow>(
        r#"
        SELECT name, instrument, start_year, end_year
        FROM integrants
        ORDER BY start_year, name
        "#,
    )
    .fetch_all(conn)
    .await
}
