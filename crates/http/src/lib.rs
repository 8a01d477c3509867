//! HTTP API server for trove.

pub mod api_error;
mod auth;
mod handlers;
mod query_types;
mod response_types;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{middleware, Json, Router};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use trove_service::ArtifactService;

pub use auth::SessionCredentials;
pub use response_types::{ReadinessResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Artifact business logic.
    pub artifacts: Arc<ArtifactService>,
    /// Login credentials from configuration.
    pub credentials: SessionCredentials,
    /// Active session tokens. In-memory on purpose: sessions do not
    /// survive a restart, matching the single-operator deployment.
    pub sessions: RwLock<HashSet<String>>,
}

impl AppState {
    #[must_use]
    pub fn new(artifacts: Arc<ArtifactService>, credentials: SessionCredentials) -> Self {
        Self { artifacts, credentials, sessions: RwLock::new(HashSet::new()) }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/artifacts", get(handlers::artifacts::list_artifacts))
        .route("/api/artifacts", post(handlers::artifacts::create_artifact))
        .route("/api/artifacts/{id}", get(handlers::artifacts::get_artifact))
        .route("/api/artifacts/{id}", delete(handlers::artifacts::delete_artifact))
        .route("/api/markers", get(handlers::artifacts::get_markers))
        .route("/api/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), auth::require_session));

    Router::new()
        .route("/health", get(health))
        .route("/api/readiness", get(readiness))
        .route("/api/version", get(version))
        .route("/api/login", post(auth::login))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn readiness() -> (StatusCode, Json<ReadinessResponse>) {
    (StatusCode::OK, Json(ReadinessResponse { status: "ready", message: None }))
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
