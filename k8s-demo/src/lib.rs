pub mod config;
pub mod downstream;
pub mod error;
pub mod handlers;
pub mod server;
pub mod shutdown;
pub mod state;

// Re-exports for convenience
pub use config::Config;
pub use error::{ApiError, ApiResult, DownstreamError};
pub use state::{AppState, ReadinessFlag};
