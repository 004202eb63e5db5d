//! Event handlers wiring user gestures to the camera, imaging and submission.
//!
//! Each [`UiEvent`] maps to one handler. Handlers report failures to the user
//! through [`UiBinding::alert`] and also return them, so a caller can decide
//! on an exit status.

use std::path::PathBuf;

use crate::camera::{CameraController, CameraError};
use crate::config::Config;
use crate::imaging::{jpeg_data_url, letterbox, ImagingError};
use crate::submit::{SelectedFile, SubmissionClient, SubmitError, ServerResult};
use crate::ui::{CameraControls, UiBinding};
use crate::view::{LoadingGuard, ResultView, TabSet, ViewError};

pub const CAMERA_ACCESS_ALERT: &str = "Could not access the camera. Check permissions.";
pub const CAPTURE_FAILED_ALERT: &str = "Could not capture photo";
pub const CAPTURE_SUBMIT_ALERT: &str = "Error while processing image";
pub const UPLOAD_SUBMIT_ALERT: &str = "Error while uploading file";
pub const FILE_READ_ALERT: &str = "Could not open the selected file";
pub const NOTHING_CAPTURED_ALERT: &str = "Take a photo first";

/// A user gesture or page lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ActivateCamera,
    /// The live stream reported its dimensions
    MetadataLoaded,
    Capture,
    Retake,
    /// Send the captured photo to `/capture`
    UploadCapture,
    FileSelected(PathBuf),
    /// Send the selected file to `/upload`
    SubmitUpload,
    OpenTab(String),
    Teardown,
}

/// Tunables the handlers need, usually taken from [`Config`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub jpeg_quality: u8,
    pub preview_size: u32,
    pub max_upload_bytes: u64,
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            jpeg_quality: config.capture.jpeg_quality,
            preview_size: config.upload.preview_size,
            max_upload_bytes: config.upload.max_file_bytes(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("No photo has been captured")]
    NothingCaptured,
}

/// The capture/upload front-end state.
pub struct App<U: UiBinding> {
    ui: U,
    camera: CameraController,
    client: SubmissionClient,
    tabs: TabSet,
    selected: Option<SelectedFile>,
    last_result: Option<ServerResult>,
    settings: AppSettings,
}

impl<U: UiBinding> App<U> {
    pub fn new(
        ui: U,
        camera: CameraController,
        client: SubmissionClient,
        settings: AppSettings,
    ) -> Self {
        let tabs = TabSet::default();
        ui.set_camera_controls(&CameraControls::inactive());
        ui.render_tabs(&tabs);
        Self {
            ui,
            camera,
            client,
            tabs,
            selected: None,
            last_result: None,
            settings,
        }
    }

    /// Dispatch one event to its handler.
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), AppError> {
        log::debug!("event: {:?}", event);
        match event {
            UiEvent::ActivateCamera => self.activate_camera(),
            UiEvent::MetadataLoaded => {
                self.metadata_loaded();
                Ok(())
            }
            UiEvent::Capture => self.capture(),
            UiEvent::Retake => {
                self.retake();
                Ok(())
            }
            UiEvent::UploadCapture => self.upload_capture().await,
            UiEvent::FileSelected(path) => self.file_selected(path).await,
            UiEvent::SubmitUpload => self.submit_upload().await,
            UiEvent::OpenTab(name) => self.open_tab(&name),
            UiEvent::Teardown => {
                self.teardown();
                Ok(())
            }
        }
    }

    /// Start (or restart) the camera and arm the capture control.
    ///
    /// A failed first activation leaves the controls alone. A failed
    /// re-activation has already stopped the live stream, so the controls
    /// fall back to their inactive state and the user can try again.
    pub fn activate_camera(&mut self) -> Result<(), AppError> {
        let was_active = self.camera.is_active();
        match self.camera.activate() {
            Ok(resolution) => {
                self.ui.show_capture_preview(None);
                self.ui.bind_live_view(resolution);
                self.ui.set_camera_controls(&CameraControls::active());
                Ok(())
            }
            Err(e) => {
                log::error!("Camera access failed: {}", e);
                if was_active && !self.camera.is_active() {
                    self.ui.show_capture_preview(None);
                    self.ui.set_camera_controls(&CameraControls::inactive());
                }
                self.ui.alert(&format!("{} ({})", CAMERA_ACCESS_ALERT, e));
                Err(e.into())
            }
        }
    }

    pub fn metadata_loaded(&mut self) {
        if !self.camera.is_active() {
            return;
        }
        self.camera.install_overlay();
        self.ui.install_overlay();
    }

    /// Freeze the current frame as a square photo. Ignored while the camera is off.
    pub fn capture(&mut self) -> Result<(), AppError> {
        let quality = self.settings.jpeg_quality;
        let data_url = match self.camera.capture() {
            Ok(None) => return Ok(()),
            Ok(Some(captured)) => captured.to_data_url(quality).map_err(AppError::from),
            Err(e) => Err(AppError::from(e)),
        };

        match data_url {
            Ok(url) => {
                self.ui.show_capture_preview(Some(&url));
                self.ui.set_overlay_visible(false);
                Ok(())
            }
            Err(e) => {
                log::error!("Capture failed: {}", e);
                self.ui.alert(&format!("{}: {}", CAPTURE_FAILED_ALERT, e));
                Err(e)
            }
        }
    }

    pub fn retake(&mut self) {
        self.camera.retake();
        self.ui.show_capture_preview(None);
        if self.camera.overlay().installed {
            self.ui.set_overlay_visible(true);
        }
    }

    /// Send the captured square to `/capture` as a JPEG data URL.
    pub async fn upload_capture(&mut self) -> Result<(), AppError> {
        let encoded = match self.camera.captured() {
            Some(captured) => captured.to_data_url(self.settings.jpeg_quality),
            None => {
                self.ui.alert(NOTHING_CAPTURED_ALERT);
                return Err(AppError::NothingCaptured);
            }
        };
        let data_url = match encoded {
            Ok(url) => url,
            Err(e) => {
                self.ui.alert(&format!("{}: {}", CAPTURE_SUBMIT_ALERT, e));
                return Err(e.into());
            }
        };

        let _loading = LoadingGuard::show(&self.ui);
        match self.client.submit_capture(&data_url).await {
            Ok(result) => {
                self.ui.show_results(&ResultView::from_result(&result));
                self.last_result = Some(result);
                Ok(())
            }
            Err(e) => {
                log::error!("Capture submission failed: {}", e);
                self.ui.alert(&format!("{}: {}", CAPTURE_SUBMIT_ALERT, e));
                Err(e.into())
            }
        }
    }

    /// Read the chosen file and show it letterboxed. The file itself is kept as-is.
    pub async fn file_selected(&mut self, path: PathBuf) -> Result<(), AppError> {
        let file = match SelectedFile::read(&path, self.settings.max_upload_bytes).await {
            Ok(file) => file,
            Err(e) => {
                self.ui.alert(&format!("{}: {}", FILE_READ_ALERT, e));
                return Err(e.into());
            }
        };

        let preview = image::load_from_memory(&file.bytes)
            .map_err(|e| ImagingError::Decode(e.to_string()))
            .and_then(|decoded| letterbox(&decoded, self.settings.preview_size))
            .and_then(|square| jpeg_data_url(&square, self.settings.jpeg_quality));

        match preview {
            Ok(url) => {
                log::info!("Selected {} ({} bytes, {})", file.name, file.len(), file.mime);
                self.ui.show_upload_preview(&url);
                self.selected = Some(file);
                Ok(())
            }
            Err(e) => {
                self.ui.alert(&format!("{}: {}", FILE_READ_ALERT, e));
                Err(e.into())
            }
        }
    }

    /// Send the selected file to `/upload`. Nothing is sent without a file.
    pub async fn submit_upload(&mut self) -> Result<(), AppError> {
        let Some(file) = self.selected.as_ref() else {
            self.ui.alert(&SubmitError::MissingFile.to_string());
            return Err(SubmitError::MissingFile.into());
        };
        if let Err(e) = file.check_size(self.settings.max_upload_bytes) {
            self.ui.alert(&format!("{}: {}", UPLOAD_SUBMIT_ALERT, e));
            return Err(e.into());
        }

        let _loading = LoadingGuard::show(&self.ui);
        match self.client.submit_upload(file).await {
            Ok(result) => {
                self.ui.show_results(&ResultView::from_result(&result));
                self.last_result = Some(result);
                Ok(())
            }
            Err(e) => {
                log::error!("Upload failed: {}", e);
                self.ui.alert(&format!("{}: {}", UPLOAD_SUBMIT_ALERT, e));
                Err(e.into())
            }
        }
    }

    pub fn open_tab(&mut self, name: &str) -> Result<(), AppError> {
        self.tabs.open(name)?;
        self.ui.render_tabs(&self.tabs);
        Ok(())
    }

    /// Release the camera; the page is going away.
    pub fn teardown(&mut self) {
        self.camera.release();
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn last_result(&self) -> Option<&ServerResult> {
        self.last_result.as_ref()
    }
}
