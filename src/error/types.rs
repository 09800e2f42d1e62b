//! Error types
//!
//! Defines the error types raised by the object store layer and by the
//! protocol adapter that sits on top of it.

use thiserror::Error;

/// Object store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The listing query itself failed (network, auth or store-side error).
    #[error("Store query failed: {0}")]
    Query(String),

    /// The store answered, but with something we could not interpret.
    #[error("Invalid store response: {0}")]
    InvalidResponse(String),

    #[error("Store configuration error: {0}")]
    Configuration(String),
}

impl From<s3::error::S3Error> for StoreError {
    fn from(error: s3::error::S3Error) -> Self {
        StoreError::Query(error.to_string())
    }
}

/// Errors returned by the file handler capabilities
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Listing failed: {0}")]
    StoreQueryFailed(#[from] StoreError),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Lookup failed: stat is unavailable for {0}")]
    StatUnavailable(String),
}

/// Control protocol login errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid password for user: {0}")]
    InvalidPassword(String),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
