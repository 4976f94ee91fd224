//! Error types for the encryption core.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors from the client-side encryption core.
///
/// None of these are retryable with the same inputs: a failed operation
/// only succeeds again if the caller supplies a different key or container.
/// [`CryptoError::EntropySourceUnavailable`] is the one fatal case: it
/// aborts the enclosing operation rather than being recoverable.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key material of the wrong length reached the cipher boundary.
    #[error("invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    /// Container too short to hold a nonce and an authentication tag.
    #[error("malformed container ({len} bytes)")]
    MalformedContainer { len: usize },

    /// Tag verification failed. Wrong key, tampered ciphertext, and
    /// truncated data all surface as this one variant so the error cannot
    /// be used as a decryption oracle.
    #[error("authentication failed (wrong key or tampered data)")]
    AuthenticationFailed,

    /// Key string did not decode to exactly 32 bytes of key material.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// The OS random source failed. Fatal to the calling operation.
    #[error("entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),

    /// AEAD encrypt-side failure. Unreachable with well-formed inputs but
    /// propagated rather than swallowed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// I/O failure while streaming a chunked container.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
