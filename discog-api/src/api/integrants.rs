//! Band member endpoint

use axum::extract::State;
use discog_common::aggregate::shape_integrants;
use discog_common::Integrant;
use serde::Serialize;

use crate::db::queries;
use crate::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct IntegrantsPayload {
    pub integrants: Vec<Integrant>,
}

/// GET /api/{band}/integrants
///
/// Members ordered by start year then name; active members end `"Present"`.
pub async fn list_integrants(State(state): State<AppState>) -> ApiResult<IntegrantsPayload> {
    state
        .respond(async {
            let mut conn = state.connection().await?;
            let rows = queries::integrant_rows(&mut conn).await?;
            Ok(IntegrantsPayload {
                integrants: shape_integrants(rows),
            })
        })
        .await
}
