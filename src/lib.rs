// WifiKeys Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, WifiError};

// Module declarations
pub mod collector;
pub mod export;
pub mod ui;

// Re-export commonly used types
pub use collector::types::{NetworkMap, NetworkRecord};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
}
