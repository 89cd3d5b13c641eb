// Module declarations for the downstream health check
pub mod checker;
pub mod client;
pub mod mock;
pub mod traits;

// Re-exports for convenience
pub use checker::{DownstreamChecker, TimeoutGuard};
pub use client::HttpDownstream;
pub use mock::{MockDownstream, MockOutcome};
pub use traits::DownstreamProbe;

/// Correlation header forwarded to the downstream
pub const REQUEST_ID_HEADER: &str = "x-request-id";
