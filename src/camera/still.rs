//! Virtual camera that serves one still image as every frame.
//!
//! Used for headless runs (`capture --frame photo.jpg`) and in tests.

use std::path::Path;

use super::device::{MediaDevices, MediaStream};
use super::types::{CameraError, CameraInfo, Frame, Resolution, StreamConstraints};

/// A media backend with a single device that always shows the same picture.
#[derive(Debug, Clone)]
pub struct StillFrameDevices {
    frame: Frame,
    name: String,
    opened: u32,
}

impl StillFrameDevices {
    /// Serve `frame` on every read.
    pub fn from_frame(frame: Frame) -> Self {
        Self {
            frame,
            name: "still frame".to_string(),
            opened: 0,
        }
    }

    /// Decode an image file and serve it as the camera feed.
    ///
    /// # Errors
    /// * `CameraError::OpenFailed` - the file is missing or not an image
    pub fn from_path(path: &Path) -> Result<Self, CameraError> {
        let image = image::open(path)
            .map_err(|e| CameraError::OpenFailed(format!("{}: {}", path.display(), e)))?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let mut devices = Self::from_frame(Frame::rgb(width, height, image.into_raw()));
        devices.name = path.display().to_string();
        Ok(devices)
    }

    /// How many streams have been opened so far.
    pub fn streams_opened(&self) -> u32 {
        self.opened
    }
}

impl MediaDevices for StillFrameDevices {
    fn list(&self) -> Result<Vec<CameraInfo>, CameraError> {
        Ok(vec![CameraInfo {
            index: 0,
            name: self.name.clone(),
            description: format!(
                "virtual camera {}",
                Resolution::new(self.frame.width, self.frame.height)
            ),
        }])
    }

    fn open(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        if constraints.device_index != 0 {
            return Err(CameraError::DeviceNotFound(constraints.device_index));
        }
        self.opened += 1;
        log::debug!(
            "Opening still-frame stream #{} ({}x{}, ideal {})",
            self.opened,
            self.frame.width,
            self.frame.height,
            constraints.ideal
        );
        Ok(Box::new(StillStream {
            frame: self.frame.clone(),
            live: true,
        }))
    }
}

struct StillStream {
    frame: Frame,
    live: bool,
}

impl MediaStream for StillStream {
    fn resolution(&self) -> Resolution {
        Resolution::new(self.frame.width, self.frame.height)
    }

    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.live {
            return Err(CameraError::NotActive);
        }
        let mut frame = self.frame.clone();
        frame.timestamp = std::time::Instant::now();
        Ok(frame)
    }

    fn stop(&mut self) {
        self.live = false;
    }
}
