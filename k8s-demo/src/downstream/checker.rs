use crate::downstream::traits::DownstreamProbe;
use crate::error::{ApiError, ApiResult, DownstreamError};
use axum::http::HeaderValue;
use common::DownstreamCheckResponse;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels a token once a deadline passes.
///
/// Dropping the guard aborts the timer, so it never outlives the call it bounds.
pub struct TimeoutGuard {
    timer: JoinHandle<()>,
}

impl TimeoutGuard {
    pub fn arm(token: CancellationToken, after: Duration) -> Self {
        let timer = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            token.cancel();
        });

        Self { timer }
    }
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

/// Runs a single bounded downstream probe per request
///
/// Process:
/// 1. Create a cancellation token for this call
/// 2. Arm a timer that cancels it after the configured timeout
/// 3. Hand the token to the probe and wait for its answer
/// 4. Disarm the timer on every path when the guard goes out of scope
pub struct DownstreamChecker {
    probe: Arc<dyn DownstreamProbe>,
    timeout: Duration,
}

impl DownstreamChecker {
    pub fn new(probe: Arc<dyn DownstreamProbe>, timeout: Duration) -> Self {
        Self { probe, timeout }
    }

    pub fn url(&self) -> &str {
        self.probe.url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn check(&self, request_id: &HeaderValue) -> ApiResult<DownstreamCheckResponse> {
        let cancel = CancellationToken::new();
        let _timer = TimeoutGuard::arm(cancel.clone(), self.timeout);

        match self.probe.get(request_id, &cancel).await {
            Ok(status) => Ok(DownstreamCheckResponse::reached(self.url(), status)),
            Err(source) => {
                // A cancelled token here can only come from our own timer
                let source = match source {
                    DownstreamError::Cancelled => DownstreamError::TimedOut {
                        timeout_ms: self.timeout.as_millis() as u64,
                    },
                    other => other,
                };

                Err(ApiError::Downstream {
                    downstream_url: self.url().to_string(),
                    source,
                })
            }
        }
    }
}
