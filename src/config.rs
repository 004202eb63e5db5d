//! Configuration file handling for flower-capture.
//!
//! Loads configuration from `<config dir>/flower-capture/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::camera::{FacingMode, Resolution, StreamConstraints};
use crate::imaging::{DEFAULT_JPEG_QUALITY, PREVIEW_SIZE};
use crate::submit::{DEFAULT_MAX_UPLOAD_MB, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};

/// Environment variable that overrides `server.url`.
pub const SERVER_URL_ENV: &str = "FLOWER_CAPTURE_SERVER";

/// Configuration file structure for flower-capture.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub device: u32,
    #[serde(default)]
    pub facing: FacingMode,
    #[serde(default = "default_camera_side")]
    pub width: u32,
    #[serde(default = "default_camera_side")]
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

#[derive(Debug, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_preview_size")]
    pub preview_size: u32,
    #[serde(default = "default_max_file_mb")]
    pub max_file_mb: u64,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_camera_side() -> u32 {
    Resolution::PREFERRED.width
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_preview_size() -> u32 {
    PREVIEW_SIZE
}

fn default_max_file_mb() -> u64 {
    DEFAULT_MAX_UPLOAD_MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            facing: FacingMode::default(),
            width: default_camera_side(),
            height: default_camera_side(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            preview_size: default_preview_size(),
            max_file_mb: default_max_file_mb(),
        }
    }
}

impl CameraConfig {
    pub fn constraints(&self) -> StreamConstraints {
        StreamConstraints {
            device_index: self.device,
            facing: self.facing,
            ideal: Resolution::new(self.width, self.height),
        }
    }
}

impl UploadConfig {
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(1024 * 1024)
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Server URL: CLI flag, then environment, then config file.
    pub fn server_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| std::env::var(SERVER_URL_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.server.url.clone())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("flower-capture").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/flower-capture/config.toml")
        })
}

/// Contents written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# flower-capture configuration

[server]
# Recognition backend (FLOWER_CAPTURE_SERVER overrides this)
url = "http://localhost:8000"
# Request timeout in seconds
timeout_secs = 30

[camera]
# Camera device index (see `flower-capture list-cameras`)
device = 0
# Facing mode: environment or user
facing = "environment"
# Preferred resolution; the camera picks the closest it supports
width = 1280
height = 1280

[capture]
# JPEG quality for captured photos (1-100)
jpeg_quality = 92

[upload]
# Edge length of the square upload preview
preview_size = 300
# Largest file accepted for upload, in megabytes
max_file_mb = 10
"#;
