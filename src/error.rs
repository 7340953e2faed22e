use std::io;
use thiserror::Error;

/// Custom error type for the WifiKeys application
#[derive(Error, Debug)]
pub enum WifiError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("SSID not known: {0}")]
    SsidNotKnown(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the WifiKeys application
pub type Result<T> = std::result::Result<T, WifiError>;

impl WifiError {
    /// Create an unsupported platform error
    pub fn unsupported_platform<S: Into<String>>(os: S) -> Self {
        WifiError::UnsupportedPlatform(os.into())
    }

    /// Create an unknown-SSID error
    pub fn ssid_not_known<S: Into<String>>(ssid: S) -> Self {
        WifiError::SsidNotKnown(ssid.into())
    }

    /// Create a command failure error
    pub fn command_failed<S: Into<String>>(msg: S) -> Self {
        WifiError::CommandFailed(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WifiError::Other(msg.into())
    }
}
