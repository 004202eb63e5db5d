//! SubmissionClient - posts photos to the recognition backend.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::types::{SelectedFile, ServerResult};
use super::SubmitError;

/// Default backend address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Default timeout for HTTP requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint for camera captures sent as a data URL.
pub const CAPTURE_ENDPOINT: &str = "/capture";

/// Endpoint for uploaded files.
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Client for the recognition backend.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl SubmissionClient {
    /// Create a client for `base_url` with default timeouts.
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(SubmitError::InvalidServerUrl(base_url.to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a captured photo as form field `image_data` to `/capture`.
    ///
    /// # Errors
    ///
    /// `SubmitError::Rejected` when the server answers without `success: true`,
    /// `SubmitError::InvalidResponse` for a body that is not JSON, or
    /// `SubmitError::HttpError` if the request fails.
    pub async fn submit_capture(&self, data_url: &str) -> Result<ServerResult, SubmitError> {
        let form = Form::new().text("image_data", data_url.to_string());
        self.post_form(CAPTURE_ENDPOINT, form).await
    }

    /// Send a file as form field `file` plus `use_camera=false` to `/upload`.
    ///
    /// # Errors
    ///
    /// Same as [`submit_capture`](Self::submit_capture).
    pub async fn submit_upload(&self, file: &SelectedFile) -> Result<ServerResult, SubmitError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new()
            .part("file", part)
            .text("use_camera", "false");
        self.post_form(UPLOAD_ENDPOINT, form).await
    }

    /// Download a processed image the server stored under `/uploads/{filename}`.
    pub async fn fetch_upload(&self, filename: &str) -> Result<Vec<u8>, SubmitError> {
        let name = filename.trim_start_matches("/uploads/").trim_start_matches('/');
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(SubmitError::InvalidFilename(filename.to_string()));
        }

        let url = format!("{}/uploads/{}", self.base_url, name);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status { status, body });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn post_form(&self, endpoint: &str, form: Form) -> Result<ServerResult, SubmitError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("POST {}", url);

        let response = self.http_client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Error responses carry JSON too; only fall back to the status when they don't.
        let result: ServerResult = match serde_json::from_str(&body) {
            Ok(result) => result,
            Err(_) if !status.is_success() => {
                return Err(SubmitError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => return Err(SubmitError::InvalidResponse(e.to_string())),
        };

        if result.success {
            log::info!(
                "{} accepted: {}",
                endpoint,
                result.filename.as_deref().unwrap_or("<no filename>")
            );
            Ok(result)
        } else {
            let message = result.failure_message();
            log::warn!("{} rejected ({}): {}", endpoint, status, message);
            Err(SubmitError::Rejected { message })
        }
    }
}
