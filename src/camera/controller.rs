//! Camera controller: owns the one live stream and the capture display state.

use super::device::{MediaDevices, MediaStream};
use super::types::{CameraError, Resolution, StreamConstraints};
use crate::imaging::{capture_square, CapturedImage};

/// What the camera view is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Live video from the stream
    Live,
    /// The last captured square, frozen
    Frozen,
}

/// State of the square framing overlay drawn over the live view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    pub installed: bool,
    pub visible: bool,
}

/// Camera controller.
///
/// Holds at most one [`MediaStream`]. `activate()` always stops the previous
/// stream before requesting a new one, and `release()` (also run on drop)
/// stops whatever is held.
pub struct CameraController {
    devices: Box<dyn MediaDevices>,
    constraints: StreamConstraints,
    stream: Option<Box<dyn MediaStream>>,
    overlay: Overlay,
    display: DisplayMode,
    captured: Option<CapturedImage>,
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("constraints", &self.constraints)
            .field("is_active", &self.is_active())
            .field("overlay", &self.overlay)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl CameraController {
    pub fn new(devices: Box<dyn MediaDevices>, constraints: StreamConstraints) -> Self {
        Self {
            devices,
            constraints,
            stream: None,
            overlay: Overlay::default(),
            display: DisplayMode::Live,
            captured: None,
        }
    }

    /// Stop any held stream and open a fresh one.
    ///
    /// Returns the resolution the new stream delivers. On error the
    /// controller is left without a stream.
    pub fn activate(&mut self) -> Result<Resolution, CameraError> {
        if let Some(mut previous) = self.stream.take() {
            previous.stop();
            log::debug!("Stopped previous camera stream");
        }

        let stream = self.devices.open(&self.constraints)?;
        let resolution = stream.resolution();
        self.stream = Some(stream);
        self.display = DisplayMode::Live;
        log::info!("Camera active at {}", resolution);
        Ok(resolution)
    }

    /// Replace the framing overlay with a fresh one once stream metadata is known.
    pub fn install_overlay(&mut self) {
        self.overlay = Overlay {
            installed: true,
            visible: true,
        };
    }

    /// Grab the current frame and crop the largest centred square out of it.
    ///
    /// Returns `Ok(None)` when the camera is not active.
    pub fn capture(&mut self) -> Result<Option<&CapturedImage>, CameraError> {
        let Some(stream) = self.stream.as_mut() else {
            log::debug!("Capture requested with camera inactive, ignoring");
            return Ok(None);
        };

        let frame = stream.read_frame()?;
        let captured = capture_square(&frame)?;
        log::info!(
            "Captured {}x{} square at offset ({}, {}) from {}x{} frame",
            captured.crop.size,
            captured.crop.size,
            captured.crop.x,
            captured.crop.y,
            frame.width,
            frame.height
        );

        self.display = DisplayMode::Frozen;
        self.overlay.visible = false;
        let captured = self.captured.insert(captured);
        Ok(Some(&*captured))
    }

    /// Go back to the live view. The captured image is kept.
    pub fn retake(&mut self) {
        self.display = DisplayMode::Live;
        if self.overlay.installed {
            self.overlay.visible = true;
        }
    }

    /// Stop the held stream, if any.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            log::info!("Camera released");
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// The last captured image, if any.
    pub fn captured(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }

    pub fn constraints(&self) -> &StreamConstraints {
        &self.constraints
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Frame, StillFrameDevices};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller_for(width: u32, height: u32) -> CameraController {
        let frame = Frame::rgb(width, height, vec![128; (width * height * 3) as usize]);
        CameraController::new(
            Box::new(StillFrameDevices::from_frame(frame)),
            StreamConstraints::default(),
        )
    }

    /// Records stream lifecycle events so tests can check ordering.
    struct TrackedDevices {
        log: Rc<RefCell<Vec<String>>>,
        next_id: u32,
        deny: bool,
    }

    struct TrackedStream {
        id: u32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl MediaStream for TrackedStream {
        fn resolution(&self) -> Resolution {
            Resolution::new(4, 2)
        }

        fn read_frame(&mut self) -> Result<Frame, CameraError> {
            Ok(Frame::rgb(4, 2, vec![0; 24]))
        }

        fn stop(&mut self) {
            self.log.borrow_mut().push(format!("stop {}", self.id));
        }
    }

    impl MediaDevices for TrackedDevices {
        fn list(&self) -> Result<Vec<crate::camera::CameraInfo>, CameraError> {
            Ok(Vec::new())
        }

        fn open(
            &mut self,
            _constraints: &StreamConstraints,
        ) -> Result<Box<dyn MediaStream>, CameraError> {
            if self.deny {
                return Err(CameraError::PermissionDenied);
            }
            self.next_id += 1;
            self.log.borrow_mut().push(format!("open {}", self.next_id));
            Ok(Box::new(TrackedStream {
                id: self.next_id,
                log: Rc::clone(&self.log),
            }))
        }
    }

    #[test]
    fn test_capture_is_noop_when_inactive() {
        let mut controller = controller_for(8, 4);
        assert!(controller.capture().unwrap().is_none());
        assert_eq!(controller.display(), DisplayMode::Live);
        assert!(controller.captured().is_none());
    }

    #[test]
    fn test_capture_freezes_display_and_hides_overlay() {
        let mut controller = controller_for(8, 4);
        controller.activate().unwrap();
        controller.install_overlay();

        let captured = controller.capture().unwrap().unwrap();
        assert_eq!(captured.image.dimensions(), (4, 4));
        assert_eq!(controller.display(), DisplayMode::Frozen);
        assert!(!controller.overlay().visible);
    }

    #[test]
    fn test_retake_restores_live_view_and_keeps_capture() {
        let mut controller = controller_for(6, 6);
        controller.activate().unwrap();
        controller.install_overlay();
        controller.capture().unwrap();

        controller.retake();
        assert_eq!(controller.display(), DisplayMode::Live);
        assert!(controller.overlay().visible);
        assert!(controller.captured().is_some());
    }

    #[test]
    fn test_retake_without_overlay_keeps_it_hidden() {
        let mut controller = controller_for(6, 6);
        controller.activate().unwrap();
        controller.retake();
        assert!(!controller.overlay().visible);
    }

    #[test]
    fn test_reactivation_stops_previous_stream_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let devices = TrackedDevices {
            log: Rc::clone(&log),
            next_id: 0,
            deny: false,
        };
        let mut controller =
            CameraController::new(Box::new(devices), StreamConstraints::default());

        controller.activate().unwrap();
        controller.activate().unwrap();
        drop(controller);

        assert_eq!(
            *log.borrow(),
            vec!["open 1", "stop 1", "open 2", "stop 2"]
        );
    }

    #[test]
    fn test_denied_activation_leaves_controller_inactive() {
        let devices = TrackedDevices {
            log: Rc::new(RefCell::new(Vec::new())),
            next_id: 0,
            deny: true,
        };
        let mut controller =
            CameraController::new(Box::new(devices), StreamConstraints::default());

        assert!(matches!(
            controller.activate(),
            Err(CameraError::PermissionDenied)
        ));
        assert!(!controller.is_active());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut controller = controller_for(2, 2);
        controller.activate().unwrap();
        controller.release();
        controller.release();
        assert!(!controller.is_active());
        assert!(controller.capture().unwrap().is_none());
    }
}
