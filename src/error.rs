//! Error handling for apiquery

use thiserror::Error;

use crate::api::schema::SchemaError;

/// Main error type for apiquery operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Response schema mismatch: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Result type alias for apiquery operations
pub type Result<T> = std::result::Result<T, ApiError>;
