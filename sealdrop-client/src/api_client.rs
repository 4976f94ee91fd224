//! HTTP client for the Sealdrop file storage API.
//!
//! The container and the client key travel as two logically distinct
//! values everywhere: a separate multipart field on upload, the
//! `x-client-key` response header on download. They are never
//! concatenated into one artifact.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{ContainerFormat, DownloadedBlob, FileMeta, ShareGrant};

/// Response header carrying the client key on downloads. Absence of the
/// header means the file was never client-side encrypted.
pub const CLIENT_KEY_HEADER: &str = "x-client-key";

/// Response header naming the container format on downloads.
pub const CONTAINER_FORMAT_HEADER: &str = "x-container-format";

/// HTTP client for the Sealdrop control plane.
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Sets the bearer token (from the external auth flow).
    pub async fn set_token(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn bearer(&self) -> ClientResult<String> {
        self.token
            .read()
            .await
            .clone()
            .ok_or(ClientError::AuthRequired)
    }

    /// Uploads an encrypted container with its metadata.
    ///
    /// `encoded_key` is `None` for the unencrypted fallback path (the
    /// server then applies its own at-rest encryption); the server must
    /// record the distinction so downloads can signal it back.
    pub async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        container: Vec<u8>,
        format: ContainerFormat,
        encoded_key: Option<&str>,
    ) -> ClientResult<FileMeta> {
        let token = self.bearer().await?;
        let url = format!("{}/api/files/", self.config.api_base_url);

        let mut form = Form::new()
            .part(
                "file",
                Part::bytes(container)
                    .file_name(file_name.to_string())
                    .mime_str("application/octet-stream")?,
            )
            .text("file_name", file_name.to_string())
            .text("mime_type", mime_type.to_string())
            .text("container_format", format.as_str());
        if let Some(key) = encoded_key {
            form = form.text("client_key", key.to_string());
        }

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await?;

        let meta: FileMeta = Self::check(resp).await?.json().await?;
        debug!("uploaded file {} ({} bytes)", meta.id, meta.size_bytes);
        Ok(meta)
    }

    /// Downloads the opaque container and the key side channel.
    pub async fn download_file(&self, file_id: &str) -> ClientResult<DownloadedBlob> {
        let token = self.bearer().await?;
        let url = format!("{}/api/files/{file_id}/download/", self.config.api_base_url);

        let resp = self.client.get(&url).bearer_auth(&token).send().await?;
        let resp = Self::check(resp).await?;

        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let client_key = header(CLIENT_KEY_HEADER);
        let format = header(CONTAINER_FORMAT_HEADER)
            .and_then(|v| ContainerFormat::parse(&v))
            .unwrap_or_default();
        let mime_type = header("content-type");

        let body = resp.bytes().await?.to_vec();
        debug!("downloaded file {file_id} ({} bytes)", body.len());

        Ok(DownloadedBlob {
            body,
            client_key,
            format,
            mime_type,
        })
    }

    /// Lists the caller's files.
    pub async fn list_files(&self) -> ClientResult<Vec<FileMeta>> {
        let token = self.bearer().await?;
        let url = format!("{}/api/files/", self.config.api_base_url);

        let resp = self.client.get(&url).bearer_auth(&token).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Grants a recipient access to a file. The server attaches the stored
    /// client key to the grant; this client never re-sends it.
    pub async fn share_file(
        &self,
        file_id: &str,
        recipient_email: &str,
    ) -> ClientResult<ShareGrant> {
        let token = self.bearer().await?;
        let url = format!("{}/api/files/{file_id}/share/", self.config.api_base_url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&serde_json::json!({ "email": recipient_email }))
            .send()
            .await?;

        let grant: ShareGrant = Self::check(resp).await?.json().await?;
        debug!("shared file {file_id} with {recipient_email}");
        Ok(grant)
    }

    /// Deletes a file and its grants.
    pub async fn delete_file(&self, file_id: &str) -> ClientResult<()> {
        let token = self.bearer().await?;
        let url = format!("{}/api/files/{file_id}/", self.config.api_base_url);

        let resp = self.client.delete(&url).bearer_auth(&token).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn check(resp: reqwest::Response) -> ClientResult<reqwest::Response> {
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::AuthRequired),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(resp.url().path().to_string())),
            status if status.is_client_error() || status.is_server_error() => {
                let body = resp.text().await.unwrap_or_default();
                Err(ClientError::Api(format!("{status}: {body}")))
            }
            _ => Ok(resp),
        }
    }
}
