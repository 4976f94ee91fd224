//! Shared types for the upload/download boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which cipher layout produced a container.
///
/// The two layouts share a wire shape but not associated data, so the
/// producing mode travels in file metadata and the matching decryptor is
/// used on retrieval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerFormat {
    /// Single nonce + ciphertext + tag over the whole file.
    #[default]
    OneShot,
    /// Base nonce + per-chunk records with chunk-level tags.
    Chunked,
}

impl ContainerFormat {
    /// Header value used on download responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerFormat::OneShot => "one-shot",
            ContainerFormat::Chunked => "chunked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "one-shot" => Some(ContainerFormat::OneShot),
            "chunked" => Some(ContainerFormat::Chunked),
            _ => None,
        }
    }
}

/// Server-side metadata for an uploaded file.
///
/// `size_bytes` is the container size, not the plaintext size; the
/// server never sees plaintext for client-encrypted files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileMeta {
    pub id: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub container_format: ContainerFormat,
    /// Whether a client key was registered for the file. The key itself
    /// is only ever returned through the download side channel.
    #[serde(default)]
    pub client_encrypted: bool,
    #[serde(default = "Utc::now")]
    pub uploaded_at: DateTime<Utc>,
}

/// A raw download before recovery: the opaque body plus whatever the key
/// side channel carried.
#[derive(Debug)]
pub struct DownloadedBlob {
    pub body: Vec<u8>,
    /// Key from the `x-client-key` header; `None` means the file was
    /// never client-side encrypted.
    pub client_key: Option<String>,
    pub format: ContainerFormat,
    pub mime_type: Option<String>,
}

/// A share grant for one file and one recipient.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareGrant {
    pub file_id: String,
    pub recipient_email: String,
    #[serde(default = "Utc::now")]
    pub granted_at: DateTime<Utc>,
}

/// A recovered file, ready for the caller.
#[derive(Debug)]
pub struct RecoveredFile {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}
