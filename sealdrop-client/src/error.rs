//! Client-side error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from the upload/download boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication required")]
    AuthRequired,

    #[error("API request failed: {0}")]
    Api(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] sealdrop_crypto::CryptoError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
