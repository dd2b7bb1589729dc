//! Service endpoints outside the catalog prefix
//!
//! `/health` is for load balancers and answers without a database connection,
//! so it stays up while the catalog is unreachable. `/test` goes through the
//! band envelope to check the response shape end to end.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{ApiResult, AppState};

/// Liveness body; carries the served band but no envelope
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub band: String,
    pub version: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "discog-api",
        band: state.band.to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct TestPayload {
    pub message: &'static str,
}

/// GET /test
pub async fn test_route(State(state): State<AppState>) -> ApiResult<TestPayload> {
    tracing::debug!("Test route accessed");
    state
        .respond(async {
            Ok(TestPayload {
                message: "Test successful",
            })
        })
        .await
}
