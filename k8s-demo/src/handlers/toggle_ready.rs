use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use common::ToggleReadyResponse;

/// Flip the readiness flag, for simulating readiness transitions in tests.
///
/// Unauthenticated; deployments that must not expose it set
/// `ALLOW_READY_TOGGLE=false`.
pub async fn toggle_ready_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ToggleReadyResponse>> {
    if !state.allow_ready_toggle {
        tracing::warn!("Rejected readiness toggle: disabled by configuration");
        return Err(ApiError::ToggleDisabled);
    }

    let ready = state.readiness.toggle();
    tracing::info!(ready, "Readiness toggled");

    Ok(Json(ToggleReadyResponse { ready }))
}
