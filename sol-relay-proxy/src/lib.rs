// Export modules for integration testing
pub mod allowlist;
pub mod api;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod relay;
