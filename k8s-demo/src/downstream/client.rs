use crate::downstream::traits::DownstreamProbe;
use crate::downstream::REQUEST_ID_HEADER;
use crate::error::{ApiError, ApiResult, DownstreamError};
use async_trait::async_trait;
use axum::http::HeaderValue;
use tokio_util::sync::CancellationToken;

/// Real implementation of DownstreamProbe backed by reqwest
///
/// The client is shared across requests so its connection pool is reused.
pub struct HttpDownstream {
    client: reqwest::Client,
    url: String,
}

impl HttpDownstream {
    pub fn new(url: impl Into<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DownstreamProbe for HttpDownstream {
    fn url(&self) -> &str {
        &self.url
    }

    async fn get(
        &self,
        request_id: &HeaderValue,
        cancel: &CancellationToken,
    ) -> Result<u16, DownstreamError> {
        // reqwest speaks its own http version; carry the raw bytes across
        let request_id = reqwest::header::HeaderValue::from_bytes(request_id.as_bytes())
            .map_err(|e| DownstreamError::Request(format!("Invalid request id: {}", e)))?;

        let request = self
            .client
            .get(&self.url)
            .header(REQUEST_ID_HEADER, request_id)
            .send();

        // Losing the race drops the in-flight request, which closes its connection
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DownstreamError::Cancelled),
            result = request => {
                let response = result?;
                Ok(response.status().as_u16())
            }
        }
    }
}
