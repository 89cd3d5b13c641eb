use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;

pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    // Kubernetes stops routing traffic while this answers 503
    if state.readiness.is_ready() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}
