//! UI binding: everything the handlers need from a front-end.
//!
//! Handlers in [`crate::app`] only talk to a [`UiBinding`]; the console
//! front-end below is one implementation, test doubles are another.
//! Methods take `&self` since a front-end is a set of shared handles.

use std::path::PathBuf;

use crate::camera::Resolution;
use crate::imaging::decode_data_url;
use crate::view::{ResultView, TabSet};

/// Label shown on the activation control once the camera is running.
pub const CAMERA_ON_LABEL: &str = "Camera on";

/// Label shown on the activation control while the camera is off.
pub const CAMERA_OFF_LABEL: &str = "Start camera";

/// Enabled state and labels of the camera controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraControls {
    pub activate_enabled: bool,
    pub activate_label: String,
    pub capture_enabled: bool,
}

impl CameraControls {
    /// Controls while no stream is held.
    pub fn inactive() -> Self {
        Self {
            activate_enabled: true,
            activate_label: CAMERA_OFF_LABEL.to_string(),
            capture_enabled: false,
        }
    }

    /// Controls once a stream is live.
    pub fn active() -> Self {
        Self {
            activate_enabled: false,
            activate_label: CAMERA_ON_LABEL.to_string(),
            capture_enabled: true,
        }
    }
}

/// Operations a front-end must provide.
pub trait UiBinding {
    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Show or hide the loading indicator.
    fn set_loading(&self, visible: bool);

    /// Bind a live stream to the video surface.
    fn bind_live_view(&self, resolution: Resolution);

    fn set_camera_controls(&self, controls: &CameraControls);

    /// Replace the framing overlay with a fresh, visible one.
    fn install_overlay(&self);

    fn set_overlay_visible(&self, visible: bool);

    /// Show the frozen capture preview, or hide it with `None`.
    fn show_capture_preview(&self, data_url: Option<&str>);

    /// Show the letterboxed preview of the file selected for upload.
    fn show_upload_preview(&self, data_url: &str);

    /// Apply the active markers of every tab.
    fn render_tabs(&self, tabs: &TabSet);

    /// Fill the results panel and scroll it into view.
    fn show_results(&self, view: &ResultView);
}

/// Front-end for the terminal: prints what a page would display.
///
/// Previews can optionally be written to disk as JPEG files.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    capture_preview_path: Option<PathBuf>,
    upload_preview_path: Option<PathBuf>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every capture preview to `path`.
    pub fn with_capture_preview_path(mut self, path: Option<PathBuf>) -> Self {
        self.capture_preview_path = path;
        self
    }

    /// Write every upload preview to `path`.
    pub fn with_upload_preview_path(mut self, path: Option<PathBuf>) -> Self {
        self.upload_preview_path = path;
        self
    }

    fn save_preview(path: &Option<PathBuf>, data_url: &str) {
        let Some(path) = path else {
            return;
        };
        match decode_data_url(data_url) {
            Ok((_, bytes)) => match std::fs::write(path, bytes) {
                Ok(()) => println!("Preview saved to {}", path.display()),
                Err(e) => log::warn!("Could not write preview {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Preview is not a data URL: {}", e),
        }
    }
}

impl UiBinding for ConsoleUi {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            println!("Processing...");
        }
        log::debug!("loading indicator {}", if visible { "on" } else { "off" });
    }

    fn bind_live_view(&self, resolution: Resolution) {
        println!("Camera streaming at {}", resolution);
    }

    fn set_camera_controls(&self, controls: &CameraControls) {
        log::debug!("camera controls: {:?}", controls);
    }

    fn install_overlay(&self) {
        log::debug!("square overlay installed");
    }

    fn set_overlay_visible(&self, visible: bool) {
        log::debug!("square overlay {}", if visible { "shown" } else { "hidden" });
    }

    fn show_capture_preview(&self, data_url: Option<&str>) {
        match data_url {
            Some(url) => {
                println!("Captured photo ({} bytes as data URL)", url.len());
                Self::save_preview(&self.capture_preview_path, url);
            }
            None => log::debug!("capture preview hidden"),
        }
    }

    fn show_upload_preview(&self, data_url: &str) {
        println!("Upload preview ready ({} bytes as data URL)", data_url.len());
        Self::save_preview(&self.upload_preview_path, data_url);
    }

    fn render_tabs(&self, tabs: &TabSet) {
        if let Some(active) = tabs.active() {
            log::debug!("active tab: {}", active);
        }
    }

    fn show_results(&self, view: &ResultView) {
        println!();
        println!("{}", view);
    }
}
