use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Static map script
        .route("/assets/censo_mapa.js", get(handlers::map_script))

        // Census map (project-scoped)
        .route("/projects/{project_id}/censo_mapa", get(handlers::show_map))
        .route("/projects/{project_id}/censo_mapa/markers", get(handlers::list_markers))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
