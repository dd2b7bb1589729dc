//! discog-api library - read-only discography catalog over HTTP
//!
//! Each request checks out one database connection, runs one query, folds the
//! flat rows into nested JSON and wraps it in the band envelope.

use std::future::Future;
use std::sync::Arc;

use axum::{http::header, http::Method, Json, Router};
use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

use error::{ApiError, EnvelopeError};

/// Successful response body: the band plus the endpoint's payload keys
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub band: String,
    #[serde(flatten)]
    pub payload: T,
}

/// Result type returned by catalog handlers
pub type ApiResult<T> = Result<Json<Envelope<T>>, EnvelopeError>;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
    /// Band name reported in every envelope
    pub band: Arc<str>,
    /// Album-name lookups merge same-named albums instead of picking the first
    pub merge_albums_by_name: bool,
}

impl AppState {
    pub fn new(db: SqlitePool, band: impl Into<Arc<str>>) -> Self {
        Self {
            db,
            band: band.into(),
            merge_albums_by_name: false,
        }
    }

    pub fn with_merge_albums_by_name(mut self, merge: bool) -> Self {
        self.merge_albums_by_name = merge;
        self
    }

    /// Check out a connection scoped to the calling request
    pub async fn connection(&self) -> Result<PoolConnection<Sqlite>, ApiError> {
        db::acquire(&self.db).await
    }

    /// Run a handler body and wrap its outcome in the band envelope
    ///
    /// Anything the body holds, including its connection, is dropped before
    /// the response is built.
    pub async fn respond<T, F>(&self, body: F) -> ApiResult<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        match body.await {
            Ok(payload) => Ok(Json(Envelope {
                band: self.band.to_string(),
                payload,
            })),
            Err(error) => Err(EnvelopeError {
                band: self.band.to_string(),
                error,
            }),
        }
    }
}

/// Build application router
///
/// Catalog routes are mounted under `api_prefix` (e.g. `/api/pearl-jam`).
pub fn build_router(state: AppState, api_prefix: &str) -> Router {
    use axum::routing::get;

    let catalog = Router::new()
        .route(api_prefix, get(api::list_discography))
        .route(&format!("{api_prefix}/albums"), get(api::list_albums))
        .route(&format!("{api_prefix}/albums/year/:year"), get(api::albums_by_year))
        .route(&format!("{api_prefix}/album/id/:id"), get(api::album_by_id))
        .route(&format!("{api_prefix}/album/:name"), get(api::album_by_name))
        .route(&format!("{api_prefix}/music/year/:year"), get(api::music_by_year))
        .route(&format!("{api_prefix}/music/:name"), get(api::music_by_name))
        .route(&format!("{api_prefix}/integrants"), get(api::list_integrants));

    let service = Router::new()
        .route("/test", get(api::test_route))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    let band = state.band.clone();

    with_service_layers(Router::new().merge(catalog).merge(service).with_state(state), band)
}

/// Wrap a router in the middleware every route shares
///
/// A handler panic becomes the enveloped 500 body for `band`; CORS and
/// request tracing apply to every response, including that one.
pub fn with_service_layers(router: Router, band: Arc<str>) -> Router {
    router
        .layer(CatchPanicLayer::custom(
            move |_: Box<dyn std::any::Any + Send + 'static>| {
                tracing::error!("Handler panicked");
                error::panic_response(&band)
            },
        ))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Any origin; the verbs and headers browsers preflight for
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}
