//! Error types for VayuPlan

use thiserror::Error;

/// VayuPlan error type
#[derive(Error, Debug)]
pub enum VayuError {
    #[error("Invalid obstacle #{index}: {reason}")]
    InvalidObstacle { index: usize, reason: String },

    #[error("Non-finite {0} coordinate")]
    NonFinite(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for VayuError {
    fn from(e: serde_json::Error) -> Self {
        VayuError::Json(e.to_string())
    }
}

impl From<toml::de::Error> for VayuError {
    fn from(e: toml::de::Error) -> Self {
        VayuError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VayuError>;
