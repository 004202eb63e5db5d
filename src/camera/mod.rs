//! Camera access and the controller that owns the live stream.
//!
//! - Device abstraction via [`MediaDevices`] and [`MediaStream`]
//! - Stream lifecycle and capture state via [`CameraController`]
//! - Backends: [`StillFrameDevices`] always, `NativeDevices` with the
//!   `native-camera` feature

mod controller;
mod device;
#[cfg(feature = "native-camera")]
mod native;
mod still;
mod types;

pub use controller::{CameraController, DisplayMode, Overlay};
pub use device::{list_devices, MediaDevices, MediaStream, NoCamera};
#[cfg(feature = "native-camera")]
pub use native::NativeDevices;
pub use still::StillFrameDevices;
pub use types::{
    CameraError, CameraInfo, FacingMode, Frame, FrameFormat, Resolution, StreamConstraints,
};
