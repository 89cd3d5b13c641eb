use serde::{Deserialize, Serialize};

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub message: String,
    pub service: String,
    pub timestamp: String,
}

/// Body of `POST /toggle-ready`, carrying the flag value after the flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleReadyResponse {
    pub ready: bool,
}

/// Body of `GET /downstream-check`
///
/// A reached downstream carries `upstream_status`; a failed call carries
/// `error` instead. `ok` is only true for a 2xx downstream status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamCheckResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub downstream_url: String,
}

impl DownstreamCheckResponse {
    /// The downstream answered, whatever its status code
    pub fn reached(downstream_url: impl Into<String>, upstream_status: u16) -> Self {
        Self {
            ok: (200..300).contains(&upstream_status),
            upstream_status: Some(upstream_status),
            error: None,
            downstream_url: downstream_url.into(),
        }
    }

    /// The call never produced a response
    pub fn failed(downstream_url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            upstream_status: None,
            error: Some(error.into()),
            downstream_url: downstream_url.into(),
        }
    }
}
