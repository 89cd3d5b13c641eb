use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the HTTP server with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::greeting_handler))
        .route("/healthz", get(handlers::health_handler))
        .route("/readyz", get(handlers::ready_handler))
        .route("/downstream-check", get(handlers::downstream_check_handler))
        .route("/toggle-ready", post(handlers::toggle_ready_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
