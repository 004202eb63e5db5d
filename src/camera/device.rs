//! Media device abstraction.
//!
//! A [`MediaDevices`] backend hands out [`MediaStream`]s. The controller only
//! ever talks to these traits, so the capture logic runs the same against a
//! real webcam, a still image, or a test double.

use super::types::{CameraError, CameraInfo, Frame, Resolution, StreamConstraints};

/// A live video stream.
pub trait MediaStream {
    /// Resolution the stream actually delivers.
    fn resolution(&self) -> Resolution;

    /// Read the current frame.
    fn read_frame(&mut self) -> Result<Frame, CameraError>;

    /// Stop every track of the stream. Calling it twice is harmless.
    fn stop(&mut self);
}

/// A source of media streams, e.g. the system's cameras.
pub trait MediaDevices {
    /// List devices this backend can open.
    fn list(&self) -> Result<Vec<CameraInfo>, CameraError>;

    /// Request a new stream matching `constraints` as closely as possible.
    ///
    /// # Errors
    /// * `CameraError::PermissionDenied` - access was refused
    /// * `CameraError::DeviceNotFound` / `CameraError::NoDevices` - nothing to open
    /// * `CameraError::StreamFailed` - the device opened but would not stream
    fn open(&mut self, constraints: &StreamConstraints)
        -> Result<Box<dyn MediaStream>, CameraError>;
}

/// Backend for setups without any camera. Every open fails with `NoDevices`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl MediaDevices for NoCamera {
    fn list(&self) -> Result<Vec<CameraInfo>, CameraError> {
        Ok(Vec::new())
    }

    fn open(
        &mut self,
        _constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        Err(CameraError::NoDevices)
    }
}

/// List the system's cameras.
#[cfg(feature = "native-camera")]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    super::native::NativeDevices.list()
}

/// List the system's cameras.
#[cfg(not(feature = "native-camera"))]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    Err(CameraError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_camera_never_opens() {
        let mut devices = NoCamera;
        assert!(devices.list().unwrap().is_empty());
        assert!(matches!(
            devices.open(&StreamConstraints::default()),
            Err(CameraError::NoDevices)
        ));
    }

    #[cfg(not(feature = "native-camera"))]
    #[test]
    fn test_list_devices_without_native_support() {
        assert!(matches!(list_devices(), Err(CameraError::Unsupported)));
    }
}
