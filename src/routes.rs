use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))

        // Relay endpoints
        .route("/translate", post(handlers::translate))
        .route("/suggest-reply", post(handlers::suggest_reply))
        .route("/synthesize-speech", post(handlers::synthesize_speech))

        // Everything else is a static asset
        .fallback_service(ServeDir::new(&state.config.static_dir))
}
