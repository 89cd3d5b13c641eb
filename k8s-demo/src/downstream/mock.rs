use crate::downstream::traits::DownstreamProbe;
use crate::error::DownstreamError;
use async_trait::async_trait;
use axum::http::HeaderValue;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// What a MockDownstream does when called
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Answer with this status code
    Status(u16),
    /// Fail as a transport error would
    Fail(String),
    /// Never answer; only cancellation ends the call
    Stall,
}

/// Mock implementation of DownstreamProbe for unit testing
#[derive(Clone)]
pub struct MockDownstream {
    url: String,
    outcome: MockOutcome,
    request_ids: Arc<Mutex<Vec<HeaderValue>>>,
}

impl MockDownstream {
    pub fn new(url: &str, outcome: MockOutcome) -> Self {
        Self {
            url: url.to_string(),
            outcome,
            request_ids: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn responding(url: &str, status: u16) -> Self {
        Self::new(url, MockOutcome::Status(status))
    }

    pub fn failing(url: &str, message: &str) -> Self {
        Self::new(url, MockOutcome::Fail(message.to_string()))
    }

    pub fn stalling(url: &str) -> Self {
        Self::new(url, MockOutcome::Stall)
    }

    /// Request ids seen so far, in call order
    pub fn request_ids(&self) -> Vec<HeaderValue> {
        self.request_ids
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl DownstreamProbe for MockDownstream {
    fn url(&self) -> &str {
        &self.url
    }

    async fn get(
        &self,
        request_id: &HeaderValue,
        cancel: &CancellationToken,
    ) -> Result<u16, DownstreamError> {
        self.request_ids
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request_id.clone());

        match &self.outcome {
            MockOutcome::Status(status) => Ok(*status),
            MockOutcome::Fail(message) => Err(DownstreamError::Request(message.clone())),
            MockOutcome::Stall => {
                cancel.cancelled().await;
                Err(DownstreamError::Cancelled)
            }
        }
    }
}
