//! Subcommand handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::args::{Args, Command, ConfigAction};
use crate::app::{App, AppError, AppSettings, UiEvent};
use crate::camera::{self, CameraController, CameraError, MediaDevices, StillFrameDevices};
use crate::config::{default_path, Config, DEFAULT_CONFIG_TEMPLATE};
use crate::submit::{SubmissionClient, SubmitError};
use crate::ui::ConsoleUi;
use crate::view::UPLOAD_TAB;

/// Run the parsed command line.
pub async fn run(args: Args, config: Config) -> Result<(), AppError> {
    let server = config.server_url(args.server.as_deref());

    match args.command {
        Command::Capture {
            frame,
            device,
            save,
            no_submit,
        } => capture(&config, &server, frame.as_deref(), device, save, no_submit).await,
        Command::Upload { file, preview } => upload(&config, &server, file, preview).await,
        Command::Fetch { filename, output } => fetch(&config, &server, &filename, &output).await,
        Command::ListCameras => {
            list_cameras();
            Ok(())
        }
        Command::Config { action } => {
            handle_config_action(action, args.config.as_deref(), &config, &server);
            Ok(())
        }
    }
}

fn client_for(config: &Config, server: &str) -> Result<SubmissionClient, SubmitError> {
    SubmissionClient::with_timeout(server, Duration::from_secs(config.server.timeout_secs))
}

#[cfg(feature = "native-camera")]
fn native_devices() -> Result<Box<dyn MediaDevices>, CameraError> {
    Ok(Box::new(camera::NativeDevices))
}

#[cfg(not(feature = "native-camera"))]
fn native_devices() -> Result<Box<dyn MediaDevices>, CameraError> {
    Err(CameraError::Unsupported)
}

/// Activate, capture one square, optionally submit it, release.
async fn capture(
    config: &Config,
    server: &str,
    frame: Option<&Path>,
    device: Option<u32>,
    save: Option<PathBuf>,
    no_submit: bool,
) -> Result<(), AppError> {
    let devices: Box<dyn MediaDevices> = match frame {
        Some(path) => Box::new(StillFrameDevices::from_path(path)?),
        None => native_devices()?,
    };

    let mut constraints = config.camera.constraints();
    if let Some(index) = device {
        constraints.device_index = index;
    }

    let ui = ConsoleUi::new().with_capture_preview_path(save);
    let camera = CameraController::new(devices, constraints);
    let mut app = App::new(ui, camera, client_for(config, server)?, AppSettings::from(config));

    let outcome = capture_flow(&mut app, no_submit).await;
    app.handle(UiEvent::Teardown).await?;
    outcome
}

async fn capture_flow(app: &mut App<ConsoleUi>, no_submit: bool) -> Result<(), AppError> {
    app.handle(UiEvent::ActivateCamera).await?;
    app.handle(UiEvent::MetadataLoaded).await?;
    app.handle(UiEvent::Capture).await?;
    if app.camera().captured().is_none() {
        return Err(AppError::NothingCaptured);
    }
    if !no_submit {
        app.handle(UiEvent::UploadCapture).await?;
    }
    Ok(())
}

/// Select a file (showing its preview) and submit it.
async fn upload(
    config: &Config,
    server: &str,
    file: PathBuf,
    preview: Option<PathBuf>,
) -> Result<(), AppError> {
    let ui = ConsoleUi::new().with_upload_preview_path(preview);
    let camera = CameraController::new(Box::new(camera::NoCamera), config.camera.constraints());
    let mut app = App::new(ui, camera, client_for(config, server)?, AppSettings::from(config));

    app.handle(UiEvent::OpenTab(UPLOAD_TAB.to_string())).await?;
    app.handle(UiEvent::FileSelected(file)).await?;
    app.handle(UiEvent::SubmitUpload).await
}

/// Download a stored image from the server.
async fn fetch(
    config: &Config,
    server: &str,
    filename: &str,
    output: &Path,
) -> Result<(), AppError> {
    let client = client_for(config, server)?;
    let bytes = client.fetch_upload(filename).await?;
    tokio::fs::write(output, &bytes)
        .await
        .map_err(SubmitError::from)?;
    println!("Saved {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

/// List available cameras and print them to stdout.
pub fn list_cameras() {
    match camera::list_devices() {
        Ok(devices) => {
            if devices.is_empty() {
                println!("No cameras found.");
                println!();
                println!("Make sure your camera is connected and permissions are granted.");
            } else {
                println!("Available cameras:");
                for device in devices {
                    println!("  {}", device);
                }
                println!();
                println!("Use `capture --device <index>` to select a camera.");
            }
        }
        Err(CameraError::Unsupported) => {
            println!("This build has no camera support.");
            println!("Rebuild with `--features native-camera`, or use `capture --frame <image>`.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    custom_path: Option<&Path>,
    config: &Config,
    server: &str,
) {
    let config_path = custom_path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Server: {}", server);
            println!("  Timeout: {}s", config.server.timeout_secs);
            println!(
                "  Camera: device {}, facing {:?}, {}x{}",
                config.camera.device,
                config.camera.facing,
                config.camera.width,
                config.camera.height
            );
            println!("  JPEG quality: {}", config.capture.jpeg_quality);
            println!(
                "  Upload preview: {}x{}",
                config.upload.preview_size, config.upload.preview_size
            );
            println!("  Upload limit: {} MB", config.upload.max_file_mb);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'flower-capture config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}
