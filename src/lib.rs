// Binwatch Library - Public API

// Re-export error types
pub mod error;
pub use error::{BinwatchError, Result};

// Module declarations
pub mod core;

// Re-export commonly used types
pub use core::config::Config;
pub use core::registry::{Resource, ResourceRegistry};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
