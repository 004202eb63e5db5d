//! Submission of captured and uploaded photos to the recognition backend.
//!
//! The backend is treated as an opaque REST endpoint taking multipart form
//! data and answering `{success, message?, filename, file_path, prediction?}`.

mod client;
mod types;

pub use client::{
    SubmissionClient, CAPTURE_ENDPOINT, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT, UPLOAD_ENDPOINT,
};
pub use types::{Prediction, SelectedFile, ServerResult, GENERIC_FAILURE};

/// Default upload size limit, matching the server's validator.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

/// Errors that can occur while submitting a photo.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please select a file")]
    MissingFile,

    #[error("File is too large ({size} bytes, limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("{message}")]
    Rejected {
        /// Server-provided reason, or the generic fallback
        message: String,
    },

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    #[error("Invalid server URL: '{0}'")]
    InvalidServerUrl(String),

    #[error("Invalid upload filename: '{0}'")]
    InvalidFilename(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
