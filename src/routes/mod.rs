/// Application routes configuration
use crate::handlers::{get_mock_vitals, get_vitals, health, survey, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Vitals pipeline
        .route("/vitals", get(get_vitals))
        .route("/vitals/mock", get(get_mock_vitals))
        // Multi-location harness
        .route("/survey", post(survey))
        .with_state(state)
}
