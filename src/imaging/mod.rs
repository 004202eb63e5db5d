//! Image processing for captured frames and upload previews.
//!
//! Everything here is a pure function of its inputs: no UI, no I/O.

mod crop;
mod encode;
mod letterbox;

pub use crop::{capture_square, frame_to_image, CapturedImage, SquareCrop};
pub use encode::{
    decode_data_url, encode_jpeg, jpeg_data_url, mime_for_format, to_data_url,
    DEFAULT_JPEG_QUALITY, JPEG_MIME,
};
pub use letterbox::{fit_placement, letterbox, Placement, PREVIEW_SIZE};

/// Errors from cropping, scaling and encoding.
#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not encode image: {0}")]
    Encode(String),

    #[error("Not a data URL")]
    InvalidDataUrl,
}
