//! Client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Sealdrop API client and transfer layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the Sealdrop API (e.g., "https://api.sealdrop.io").
    pub api_base_url: String,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Files at or above this size are encrypted in the chunked streaming
    /// format instead of one-shot; the choice is recorded in the file
    /// metadata so download uses the matching decryptor.
    pub chunked_threshold_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.sealdrop.io".to_string(),
            request_timeout_secs: 30,
            chunked_threshold_bytes: 8 * 1024 * 1024, // 8 MiB
        }
    }
}

impl ClientConfig {
    /// Creates a config pointed at a local mock server.
    #[cfg(test)]
    pub fn test(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            request_timeout_secs: 5,
            chunked_threshold_bytes: 1024,
        }
    }
}
