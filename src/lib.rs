// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod execution;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod scheduler;
pub mod strategy;

// Re-export commonly used types
pub use api::{ExchangeGateway, RetryPolicy};
pub use config::Config;
pub use models::*;
pub use strategy::Strategy;
