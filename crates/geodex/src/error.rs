//! Error types for geodex app services
//!
//! One application-level error enum; store operations that must never fail
//! past their boundary catch these internally and degrade to defaults.

use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl AppError {
    /// Map an error to the message shown to the user via the notification
    /// channel. `default` is used when no more specific wording applies.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            AppError::Network(e) => match e.status() {
                Some(status) if status.as_u16() == 404 => "Resource not found".to_string(),
                Some(status) if status.as_u16() == 500 => {
                    "Server error. Please try again later.".to_string()
                }
                Some(status) if status.is_client_error() => {
                    "Request failed. Please check your input.".to_string()
                }
                Some(_) => default.to_string(),
                // No response at all: connect failure, timeout, DNS, ...
                None => "Network error. Please check your connection.".to_string(),
            },
            AppError::NotFound(_) => "Resource not found".to_string(),
            _ => default.to_string(),
        }
    }
}

/// Result type alias for geodex app services
pub type Result<T> = std::result::Result<T, AppError>;
