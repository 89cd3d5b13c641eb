// Re-export commonly used items
pub mod types;

// Convenience re-exports
pub use types::{DownstreamCheckResponse, GreetingResponse, ToggleReadyResponse};
