use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::warn;

use crate::models::OutputDocument;
use crate::output::read_document;

#[derive(Clone)]
pub struct AppState {
    /// The document written by the last successful run
    pub output_path: PathBuf,
}

/// Build the read-only data router; `static_dir` serves front-end assets for
/// every other path.
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/data", get(data_handler))
        .route("/api/games", get(games_handler))
        .route("/api/edges", get(edges_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state));

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Re-read the document so a later run's output is picked up without a restart.
fn load(state: &AppState) -> Result<OutputDocument, (StatusCode, String)> {
    read_document(&state.output_path).map_err(|e| {
        warn!("Output document unavailable: {:#}", e);
        (StatusCode::SERVICE_UNAVAILABLE, format!("{:#}", e))
    })
}

/// GET /api/data
async fn data_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    load(&state).map(Json)
}

/// GET /api/games
async fn games_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    load(&state).map(|doc| Json(doc.games))
}

/// GET /api/edges
async fn edges_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    load(&state).map(|doc| Json(doc.betting_edges))
}
