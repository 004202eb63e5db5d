//! Webcam backend built on nokhwa.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;

use super::device::{MediaDevices, MediaStream};
use super::types::{CameraError, CameraInfo, FacingMode, Frame, Resolution, StreamConstraints};

/// The system's cameras.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDevices;

impl MediaDevices for NativeDevices {
    fn list(&self) -> Result<Vec<CameraInfo>, CameraError> {
        let devices = nokhwa::query(ApiBackend::Auto)
            .map_err(|e| CameraError::QueryFailed(e.to_string()))?;

        Ok(devices
            .into_iter()
            .map(|d| CameraInfo {
                index: d.index().as_index().unwrap_or(0),
                name: d.human_name(),
                description: d.description().to_string(),
            })
            .collect())
    }

    fn open(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        let devices = self.list()?;
        if devices.is_empty() {
            return Err(CameraError::NoDevices);
        }
        if !devices.iter().any(|d| d.index == constraints.device_index) {
            return Err(CameraError::DeviceNotFound(constraints.device_index));
        }

        if constraints.facing == FacingMode::Environment {
            log::debug!("Facing mode is not selectable on this backend, using device index");
        }

        let mut camera = open_camera_with_fallback(constraints)?;
        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        let res = camera.resolution();
        let resolution = Resolution::new(res.width(), res.height());
        log::info!(
            "Opened camera {} at {}",
            constraints.device_index,
            resolution
        );

        Ok(Box::new(NativeStream {
            camera,
            resolution,
            stopped: false,
        }))
    }
}

/// A running webcam stream.
struct NativeStream {
    camera: Camera,
    resolution: Resolution,
    stopped: bool,
}

impl MediaStream for NativeStream {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        if self.stopped {
            return Err(CameraError::NotActive);
        }
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;
        convert_to_rgb(&buffer)
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream cleanly: {}", e);
        }
        self.stopped = true;
    }
}

/// Convert a nokhwa buffer (MJPEG, YUYV, NV12, ...) to an RGB frame.
fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Result<Frame, CameraError> {
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::StreamFailed(format!("undecodable frame: {}", e)))?;
    let resolution = buffer.resolution();

    Ok(Frame::rgb(
        resolution.width(),
        resolution.height(),
        decoded.into_raw(),
    ))
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(constraints: &StreamConstraints) -> Result<Camera, CameraError> {
    let index = CameraIndex::Index(constraints.device_index);
    let wanted =
        nokhwa::utils::Resolution::new(constraints.ideal.width, constraints.ideal.height);

    // NV12 is native on macOS, MJPEG nearly everywhere else; last resort lets
    // the camera choose.
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            wanted,
            NokhwaFrameFormat::NV12,
            30,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            wanted,
            NokhwaFrameFormat::MJPEG,
            30,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;
    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => last_error = Some(e),
        }
    }

    let message = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no usable format".to_string());
    let lower = message.to_lowercase();
    if lower.contains("permission")
        || lower.contains("denied")
        || lower.contains("authorization")
        || lower.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(message))
    }
}
