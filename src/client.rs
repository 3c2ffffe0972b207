//! Client side of the presigned upload flow.
//!
//! Uploads never move file bytes through the gateway: the client first asks
//! the gateway for a presigned URL, then PUTs the payload straight to the
//! object store and keeps the query-stripped URL as the durable address.

use crate::utils::content_type;
use bytes::Bytes;
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("upload URL missing from response")]
    MissingUploadUrl,

    #[error("Upload failed")]
    Failed,
}

/// In-memory payload plus the metadata the gateway needs to key it.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing the content type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
            })?
            .to_string();

        let data = tokio::fs::read(path).await?;
        let content_type = content_type::from_extension(&name).to_string();

        Ok(Self {
            name,
            content_type: Some(content_type),
            data: Bytes::from(data),
        })
    }

    fn resolved_content_type(&self) -> &str {
        match self.content_type.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => mime::APPLICATION_OCTET_STREAM.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct PresignRequest<'a> {
    #[serde(rename = "fileName")]
    file_name: &'a str,
}

#[derive(Deserialize)]
struct PresignResponse {
    #[serde(rename = "uploadURL")]
    upload_url: Option<String>,
}

/// Uploaded object handle; `url` is the durable access URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Ask the gateway for a presigned upload URL for `file_name`.
    pub async fn request_upload_url(&self, file_name: &str) -> Result<String, UploadError> {
        let response = self
            .http
            .post(format!("{}/api/get-presigned-upload-url", self.base_url))
            .json(&PresignRequest { file_name })
            .send()
            .await?;

        let body: PresignResponse = response.json().await?;
        body.upload_url.ok_or(UploadError::MissingUploadUrl)
    }

    /// Upload `file` and return its durable access URL.
    ///
    /// The PUT only starts once the presign call has fully completed, and a
    /// non-success status from the store fails the whole operation.
    pub async fn upload(&self, file: UploadFile) -> Result<UploadedFile, UploadError> {
        let upload_url = self.request_upload_url(&file.name).await?;

        let content_type = file.resolved_content_type().to_string();
        let response = self
            .http
            .put(&upload_url)
            .header(header::CONTENT_TYPE, content_type)
            .body(file.data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UploadError::Failed);
        }

        Ok(UploadedFile {
            url: access_url(&upload_url),
        })
    }
}

/// Strip the signing query parameters, leaving the durable access URL.
fn access_url(signed_url: &str) -> String {
    match signed_url.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => signed_url.to_string(),
    }
}
