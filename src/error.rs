// src/error.rs

//! Unified error handling for the analyzer.

use std::fmt;

use thiserror::Error;

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The remote API answered with a non-OK envelope
    #[error("Codeforces API returned status {status} with error message \"{comment}\"")]
    Api { status: String, comment: String },

    /// A blog could not be fetched
    #[error("Fetch error for blog {blog_id}: {message}")]
    Fetch { blog_id: u64, message: String },

    /// A matched problem URL did not normalize to a canonical key
    #[error("Malformed problem reference '{url}': {reason}")]
    MalformedReference { url: String, reason: String },

    /// Persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error for a blog id.
    pub fn fetch(blog_id: u64, message: impl fmt::Display) -> Self {
        Self::Fetch {
            blog_id,
            message: message.to_string(),
        }
    }

    /// Create a malformed reference error.
    pub fn malformed(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedReference {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error came from talking to the remote platform.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. } | Self::Fetch { .. })
    }
}
