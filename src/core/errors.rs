//! Custom error types for translation and history persistence

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The request could not complete
    #[error("Network error: {message}")]
    Network {
        message: String,
    },

    /// Provider answered with a non-2xx status
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Invalid response: {message}")]
    Decode {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },
}

/// History persistence errors. Never surfaced past the history store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
