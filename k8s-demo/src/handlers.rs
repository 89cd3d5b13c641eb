// Module declarations for HTTP handlers
pub mod downstream_check;
pub mod greeting;
pub mod health;
pub mod ready;
pub mod toggle_ready;

// Re-exports
pub use downstream_check::downstream_check_handler;
pub use greeting::greeting_handler;
pub use health::health_handler;
pub use ready::ready_handler;
pub use toggle_ready::toggle_ready_handler;
