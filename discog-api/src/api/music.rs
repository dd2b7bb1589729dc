//! Song endpoints

use axum::extract::{Path, State};
use discog_common::SongDetail;
use serde::Serialize;
use tracing::debug;

use crate::db::queries;
use crate::error::ApiError;
use crate::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct MusicPayload {
    pub music: SongDetail,
}

/// Song names only, no album nesting
#[derive(Debug, Serialize)]
pub struct MusicByYearPayload {
    pub year: i64,
    pub music: Vec<String>,
}

/// GET /api/{band}/music/:name
///
/// Returns the first matching song when several share the name.
pub async fn music_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<MusicPayload> {
    debug!("Music requested by name: {}", name);
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let row = queries::song_by_name(&mut conn, &name).await?;
            row.map(|row| MusicPayload { music: row.into() })
                .ok_or_else(|| ApiError::NotFound(format!("Music '{}' not found", name)))
        })
        .await
}

/// GET /api/{band}/music/year/:year
pub async fn music_by_year(
    State(state): State<AppState>,
    Path(year): Path<i64>,
) -> ApiResult<MusicByYearPayload> {
    debug!("Music requested for year {}", year);
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let music = queries::song_names_by_year(&mut conn, year).await?;
            if music.is_empty() {
                return Err(ApiError::NotFound(format!(
                    "No music found for the year {}",
                    year
                )));
            }
            Ok(MusicByYearPayload { year, music })
        })
        .await
}
