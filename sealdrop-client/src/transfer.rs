//! Transfer orchestration: encrypt-then-upload, download-then-recover.
//!
//! Composes the crypto core's entry points with the API client. The
//! format choice (one-shot vs chunked) is made here by file size and
//! recorded in metadata; recovery dispatches on what the server sends
//! back. A downloaded file without a client key passes through untouched
//! instead of failing. That is a distinct outcome from a decryption
//! failure, which is surfaced as a typed error and never retried.

use std::io::Cursor;
use std::sync::Arc;

use sealdrop_crypto::{
    prepare_for_upload, prepare_stream_for_upload, recover_from_download,
    recover_stream_from_download,
};
use tracing::{debug, info};

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::types::{ContainerFormat, FileMeta, RecoveredFile, ShareGrant};

/// Client-side encrypting file transfer.
pub struct FileTransfer {
    api: Arc<ApiClient>,
    config: ClientConfig,
}

impl FileTransfer {
    pub fn new(api: Arc<ApiClient>, config: ClientConfig) -> Self {
        Self { api, config }
    }

    /// Encrypts `data` under a fresh key and uploads it.
    ///
    /// The container goes up as the file body; the key goes up as a
    /// separate field for the server to hand out with grants.
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> ClientResult<FileMeta> {
        let (container, encoded_key, format) =
            if data.len() as u64 >= self.config.chunked_threshold_bytes {
                let mut container = Vec::new();
                let (_, key) = prepare_stream_for_upload(Cursor::new(data), &mut container)?;
                (container, key, ContainerFormat::Chunked)
            } else {
                let (container, key) = prepare_for_upload(data)?;
                (container, key, ContainerFormat::OneShot)
            };

        debug!(
            "encrypted {file_name}: {} plaintext -> {} container bytes ({format:?})",
            data.len(),
            container.len()
        );

        let meta = self
            .api
            .upload_file(file_name, mime_type, container, format, Some(&encoded_key))
            .await?;
        info!("uploaded {file_name} as {}", meta.id);
        Ok(meta)
    }

    /// Uploads `data` without client-side encryption (fallback path).
    ///
    /// No key is generated or transmitted; the server's own at-rest
    /// encryption is the only protection.
    pub async fn upload_unencrypted(
        &self,
        file_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> ClientResult<FileMeta> {
        let meta = self
            .api
            .upload_file(file_name, mime_type, data.to_vec(), ContainerFormat::OneShot, None)
            .await?;
        info!("uploaded {file_name} unencrypted as {}", meta.id);
        Ok(meta)
    }

    /// Downloads a file and recovers its plaintext.
    pub async fn download(&self, file_id: &str) -> ClientResult<RecoveredFile> {
        let blob = self.api.download_file(file_id).await?;
        let key = blob.client_key.as_deref();

        let data = match blob.format {
            ContainerFormat::OneShot => recover_from_download(&blob.body, key)?,
            ContainerFormat::Chunked => {
                let mut out = Vec::new();
                recover_stream_from_download(Cursor::new(&blob.body), &mut out, key)?;
                out
            }
        };

        debug!(
            "recovered file {file_id}: {} container -> {} plaintext bytes (client key: {})",
            blob.body.len(),
            data.len(),
            key.is_some()
        );
        Ok(RecoveredFile {
            data,
            mime_type: blob.mime_type,
        })
    }

    /// Shares a file with a recipient. The stored key travels with the
    /// grant on the server side; this call transmits no key material.
    pub async fn share(&self, file_id: &str, recipient_email: &str) -> ClientResult<ShareGrant> {
        self.api.share_file(file_id, recipient_email).await
    }
}
