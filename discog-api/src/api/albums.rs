//! Album endpoints
//!
//! All of these fold `albums LEFT JOIN songs` rows into albums with nested
//! songs. Lookups by a single key report 404 only when no album row came back
//! at all; an album that exists with no songs is returned with `songs: []`.

use axum::extract::{Path, State};
use discog_common::aggregate::{group_albums, single_album};
use discog_common::Album;
use serde::Serialize;
use tracing::debug;

use crate::db::queries;
use crate::error::ApiError;
use crate::{ApiResult, AppState};

/// Full discography under the singular `album` key
#[derive(Debug, Serialize)]
pub struct DiscographyPayload {
    pub album: Vec<Album>,
}

#[derive(Debug, Serialize)]
pub struct AlbumsPayload {
    pub albums: Vec<Album>,
}

#[derive(Debug, Serialize)]
pub struct AlbumsByYearPayload {
    pub year: i64,
    pub albums: Vec<Album>,
}

#[derive(Debug, Serialize)]
pub struct AlbumPayload {
    pub album: Album,
}

/// GET /api/{band}
pub async fn list_discography(State(state): State<AppState>) -> ApiResult<DiscographyPayload> {
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let rows = queries::all_album_rows(&mut conn).await?;
            Ok(DiscographyPayload {
                album: group_albums(rows),
            })
        })
        .await
}

/// GET /api/{band}/albums
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<AlbumsPayload> {
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let rows = queries::all_album_rows(&mut conn).await?;
            Ok(AlbumsPayload {
                albums: group_albums(rows),
            })
        })
        .await
}

/// GET /api/{band}/albums/year/:year
pub async fn albums_by_year(
    State(state): State<AppState>,
    Path(year): Path<i64>,
) -> ApiResult<AlbumsByYearPayload> {
    debug!("Albums requested for year {}", year);
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let rows = queries::album_rows_by_year(&mut conn, year).await?;
            if rows.is_empty() {
                return Err(ApiError::NotFound(format!(
                    "No albums found for the year {}",
                    year
                )));
            }
            Ok(AlbumsByYearPayload {
                year,
                albums: group_albums(rows),
            })
        })
        .await
}

/// GET /api/{band}/album/:name
pub async fn album_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<AlbumPayload> {
    debug!("Album requested by name: {}", name);
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let rows = queries::album_rows_by_name(&mut conn, &name).await?;
            single_album(rows, state.merge_albums_by_name)
                .map(|album| AlbumPayload { album })
                .ok_or_else(|| ApiError::NotFound(format!("Album '{}' not found", name)))
        })
        .await
}

/// GET /api/{band}/album/id/:id
pub async fn album_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<AlbumPayload> {
    debug!("Album requested by id: {}", id);
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let rows = queries::album_rows_by_id(&mut conn, id).await?;
            single_album(rows, false)
                .map(|album| AlbumPayload { album })
                .ok_or_else(|| ApiError::NotFound(format!("Album with id {} not found", id)))
        })
        .await
}
