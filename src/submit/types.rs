//! Request and response types for the recognition backend.

use std::path::Path;

use serde::Deserialize;

use crate::imaging::mime_for_format;

use super::SubmitError;

/// Shown when the server fails without saying why.
pub const GENERIC_FAILURE: &str = "An error occurred";

/// Response body of `/capture` and `/upload`.
///
/// Deliberately loose: every field except `success` may be missing, and
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// FastAPI-style error detail (string or validation list)
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
}

impl ServerResult {
    /// Best human-readable reason for a failed submission.
    pub fn failure_message(&self) -> String {
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return message.to_string();
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Recognition result; only present once a model is wired in on the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub flower_type: String,
    pub confidence: f64,
    #[serde(default)]
    pub additional_info: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A file picked for upload, held unmodified until it is submitted.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl SelectedFile {
    /// Build from in-memory bytes, sniffing the MIME type from the content.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = image::guess_format(&bytes)
            .map(mime_for_format)
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            name: name.into(),
            bytes,
            mime,
        }
    }

    /// Read a file from disk, refusing anything over `max_bytes` before loading it.
    pub async fn read(path: &Path, max_bytes: u64) -> Result<Self, SubmitError> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > max_bytes {
            return Err(SubmitError::FileTooLarge {
                size,
                limit: max_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let file = Self::new(name, bytes);
        // The file may have grown since the metadata call
        file.check_size(max_bytes)?;
        Ok(file)
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reject files over `max_bytes` before they hit the network.
    pub fn check_size(&self, max_bytes: u64) -> Result<(), SubmitError> {
        if self.len() > max_bytes {
            return Err(SubmitError::FileTooLarge {
                size: self.len(),
                limit: max_bytes,
            });
        }
        Ok(())
    }
}
