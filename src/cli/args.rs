//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Capture or upload flower photos for recognition
#[derive(Parser, Debug)]
#[command(name = "flower-capture")]
#[command(version, about = "Capture or upload flower photos for recognition", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Crop a square from a still image and send it to /capture
    flower-capture capture --frame garden.jpg --save square.jpg

    # Upload a file to /upload, keeping the 300x300 preview
    flower-capture upload rose.png --preview preview.jpg

    # Download a processed image the server stored
    flower-capture fetch 3f2c.jpg --output 3f2c.jpg")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Recognition server base URL (overrides config and FLOWER_CAPTURE_SERVER)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take a square photo from the camera and submit it
    Capture {
        /// Use this image as the camera feed instead of a real device
        #[arg(long, conflicts_with = "device")]
        frame: Option<PathBuf>,

        /// Camera device index (from list-cameras)
        #[arg(long)]
        device: Option<u32>,

        /// Write the captured square to this file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Only capture, do not send to the server
        #[arg(long)]
        no_submit: bool,
    },
    /// Submit an image file
    Upload {
        /// Image file to upload
        file: PathBuf,

        /// Write the letterboxed preview to this file
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Download an image the server stored under /uploads
    Fetch {
        /// File name as returned by capture/upload
        filename: String,

        /// Where to write the image
        #[arg(long, short)]
        output: PathBuf,
    },
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
