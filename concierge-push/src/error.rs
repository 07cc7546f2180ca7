//! Error types for push delivery

use thiserror::Error;

/// Push error types
#[derive(Debug, Error)]
pub enum PushError {
    /// Transport failure talking to the provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered but rejected the request
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider response did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid provider configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for push operations
pub type PushResult<T> = Result<T, PushError>;
