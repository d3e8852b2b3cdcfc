//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use error::{FactoryError, FactoryResult};
pub use logging::init_test_logger;
