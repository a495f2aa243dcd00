/// Application routes configuration
use crate::handlers::{get_apod, get_epic, get_rover, get_rover_manifest, health, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Imagery endpoints
        .route("/apod", get(get_apod))
        .route("/epic", get(get_epic))
        // Mars rover endpoints
        .route("/rovers/:rover", get(get_rover))
        .route("/rovers/:rover/manifest", get(get_rover_manifest))
        .with_state(state)
}
