//! Camera types and data structures.

use std::fmt;
use std::time::Instant;

use serde::Deserialize;

use crate::imaging::ImagingError;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Camera resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Preferred capture resolution (1280x1280). Devices pick the closest mode.
    pub const PREFERRED: Resolution = Resolution {
        width: 1280,
        height: 1280,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::PREFERRED
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which way the requested camera should face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front camera
    User,
    /// Rear camera, pointed at the subject
    #[default]
    Environment,
}

/// Pixel format of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
}

/// A single video frame read from a stream.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data in RGB format
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Build an RGB frame from raw pixel data.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        }
    }

    /// Get the number of bytes per pixel (3 for RGB).
    pub fn bytes_per_pixel(&self) -> usize {
        match self.format {
            FrameFormat::Rgb => 3,
        }
    }

    /// Number of bytes a frame of this size and format must hold.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_pixel()
    }
}

/// What to ask a device for when opening a stream.
#[derive(Debug, Clone)]
pub struct StreamConstraints {
    /// Camera device index (ignored by sources that only have one)
    pub device_index: u32,
    /// Preferred facing mode
    pub facing: FacingMode,
    /// Ideal resolution; the device may deliver something else
    pub ideal: Resolution,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            device_index: 0,
            facing: FacingMode::Environment,
            ideal: Resolution::PREFERRED,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("No cameras found")]
    NoDevices,

    #[error("Failed to query cameras: {0}")]
    QueryFailed(String),

    #[error("Failed to open camera: {0}")]
    OpenFailed(String),

    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera device {0} not found. Run 'list-cameras' to see available devices")]
    DeviceNotFound(u32),

    #[error("Failed to start camera stream: {0}")]
    StreamFailed(String),

    #[error("Camera is not active")]
    NotActive,

    #[error("Camera support not compiled in (enable the 'native-camera' feature)")]
    Unsupported,

    #[error("Failed to process frame: {0}")]
    Frame(#[from] ImagingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            index: 0,
            name: "Test Camera".to_string(),
            description: "Built-in".to_string(),
        };
        assert_eq!(format!("{}", info), "[0] Test Camera (Built-in)");
    }

    #[test]
    fn test_preferred_resolution_is_square() {
        assert_eq!(Resolution::PREFERRED.width, 1280);
        assert_eq!(Resolution::PREFERRED.height, 1280);
        assert_eq!(Resolution::default(), Resolution::PREFERRED);
    }

    #[test]
    fn test_default_constraints_face_environment() {
        let constraints = StreamConstraints::default();
        assert_eq!(constraints.facing, FacingMode::Environment);
        assert_eq!(constraints.ideal, Resolution::PREFERRED);
        assert_eq!(constraints.device_index, 0);
    }

    #[test]
    fn test_frame_expected_len() {
        let frame = Frame::rgb(4, 2, vec![0; 24]);
        assert_eq!(frame.bytes_per_pixel(), 3);
        assert_eq!(frame.expected_len(), 24);
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(format!("{}", CameraError::NoDevices), "No cameras found");
        assert_eq!(
            format!("{}", CameraError::OpenFailed("busy".to_string())),
            "Failed to open camera: busy"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert!(format!("{}", CameraError::DeviceNotFound(5)).contains('5'));
    }

    #[test]
    fn test_facing_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            facing: FacingMode,
        }
        let w: Wrapper = toml::from_str("facing = \"user\"").unwrap();
        assert_eq!(w.facing, FacingMode::User);
    }
}
