use crate::error::DownstreamError;
use async_trait::async_trait;
use axum::http::HeaderValue;
use tokio_util::sync::CancellationToken;

/// A single outbound call used to judge a dependency's health
#[async_trait]
pub trait DownstreamProbe: Send + Sync {
    /// URL the probe targets, echoed back to callers
    fn url(&self) -> &str;

    /// Issue one GET carrying `request_id` as `x-request-id` and return the
    /// status code.
    ///
    /// Implementations must stop waiting and return
    /// `DownstreamError::Cancelled` once `cancel` fires, releasing whatever
    /// connection the call holds.
    async fn get(
        &self,
        request_id: &HeaderValue,
        cancel: &CancellationToken,
    ) -> Result<u16, DownstreamError>;
}
