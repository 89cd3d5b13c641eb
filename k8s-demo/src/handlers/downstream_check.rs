use crate::downstream::REQUEST_ID_HEADER;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use chrono::Utc;
use common::DownstreamCheckResponse;

/// Downstream check endpoint - one bounded GET against the configured URL
///
/// Any answer from the downstream is a 200 carrying its status; no answer
/// at all (timeout, refused, DNS) is a 503.
pub async fn downstream_check_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<DownstreamCheckResponse>> {
    let request_id = request_id(&headers)?;

    tracing::debug!(
        request_id = ?request_id,
        url = state.downstream.url(),
        "Checking downstream"
    );

    match state.downstream.check(&request_id).await {
        Ok(response) => {
            tracing::info!(
                request_id = ?request_id,
                upstream_status = ?response.upstream_status,
                "Downstream answered"
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!(request_id = ?request_id, "{}", e);
            Err(e)
        }
    }
}

/// Caller's `x-request-id` byte for byte, or `local-<epoch millis>` when
/// absent or empty
fn request_id(headers: &HeaderMap) -> ApiResult<HeaderValue> {
    if let Some(value) = headers
        .get(REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty())
    {
        return Ok(value.clone());
    }

    HeaderValue::try_from(format!("local-{}", Utc::now().timestamp_millis()))
        .map_err(|e| ApiError::Internal(format!("Invalid request id: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downstream::{DownstreamChecker, DownstreamProbe, MockDownstream};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_state(mock: &MockDownstream, timeout_ms: u64) -> AppState {
        let probe: Arc<dyn DownstreamProbe> = Arc::new(mock.clone());
        AppState::new(
            Arc::new(DownstreamChecker::new(
                probe,
                Duration::from_millis(timeout_ms),
            )),
            true,
        )
    }

    fn is_synthesized(id: &HeaderValue) -> bool {
        id.to_str()
            .ok()
            .and_then(|id| id.strip_prefix("local-"))
            .is_some_and(|millis| !millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_request_id_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));

        assert_eq!(request_id(&headers).unwrap(), "abc-123");
    }

    #[test]
    fn test_request_id_forwards_non_utf8_bytes() {
        let raw = HeaderValue::from_bytes(b"trace-caf\xe9").unwrap();
        assert!(raw.to_str().is_err());
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, raw.clone());

        assert_eq!(request_id(&headers).unwrap(), raw);
    }

    #[test]
    fn test_request_id_synthesized_when_missing() {
        assert!(is_synthesized(&request_id(&HeaderMap::new()).unwrap()));
    }

    #[test]
    fn test_request_id_synthesized_when_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(""));

        assert!(is_synthesized(&request_id(&headers).unwrap()));
    }

    #[tokio::test]
    async fn test_downstream_check_success() {
        let mock = MockDownstream::responding("http://svc/status/200", 200);
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("trace-7"));

        let response = downstream_check_handler(State(test_state(&mock, 500)), headers)
            .await
            .unwrap();

        assert_eq!(
            response.0,
            DownstreamCheckResponse::reached("http://svc/status/200", 200)
        );
        assert_eq!(mock.request_ids(), vec![HeaderValue::from_static("trace-7")]);
    }

    #[tokio::test]
    async fn test_downstream_check_synthesizes_request_id() {
        let mock = MockDownstream::responding("http://svc/status/200", 200);

        let response = downstream_check_handler(State(test_state(&mock, 500)), HeaderMap::new())
            .await
            .unwrap();

        assert!(response.0.ok);
        let ids = mock.request_ids();
        assert_eq!(ids.len(), 1);
        assert!(is_synthesized(&ids[0]), "unexpected id {:?}", ids[0]);
    }

    #[tokio::test]
    async fn test_downstream_check_forwards_non_utf8_request_id() {
        let mock = MockDownstream::responding("http://svc/status/200", 200);
        let raw = HeaderValue::from_bytes(b"trace-caf\xe9").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, raw.clone());

        let response = downstream_check_handler(State(test_state(&mock, 500)), headers)
            .await
            .unwrap();

        assert_eq!(response.0.upstream_status, Some(200));
        assert_eq!(mock.request_ids(), vec![raw]);
    }

    #[tokio::test]
    async fn test_downstream_check_timeout_is_unavailable() {
        let mock = MockDownstream::stalling("http://svc/slow");

        let err = downstream_check_handler(State(test_state(&mock, 30)), HeaderMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Downstream { .. }));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
