//! Square crop of camera frames.

use image::{imageops, RgbImage};

use super::encode::jpeg_data_url;
use super::ImagingError;
use crate::camera::Frame;

/// The largest square centred in a `width x height` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareCrop {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl SquareCrop {
    /// `size = min(w, h)`, offsets split the leftover evenly (odd pixel goes right/bottom).
    pub fn centered(width: u32, height: u32) -> Result<Self, ImagingError> {
        if width == 0 || height == 0 {
            return Err(ImagingError::Empty { width, height });
        }
        let size = width.min(height);
        Ok(Self {
            x: (width - size) / 2,
            y: (height - size) / 2,
            size,
        })
    }
}

/// A captured square photo.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    /// `crop.size x crop.size` RGB pixels
    pub image: RgbImage,
    /// Where in the source frame the square came from
    pub crop: SquareCrop,
}

impl CapturedImage {
    /// Encode as a `data:image/jpeg;base64,...` URL.
    pub fn to_data_url(&self, quality: u8) -> Result<String, ImagingError> {
        jpeg_data_url(&self.image, quality)
    }
}

/// Wrap a frame's pixel buffer as an image, checking its length.
pub fn frame_to_image(frame: &Frame) -> Result<RgbImage, ImagingError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(ImagingError::Empty {
            width: frame.width,
            height: frame.height,
        });
    }
    let expected = frame.expected_len();
    if frame.data.len() != expected {
        return Err(ImagingError::BufferMismatch {
            expected,
            actual: frame.data.len(),
        });
    }
    RgbImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or(
        ImagingError::BufferMismatch {
            expected,
            actual: frame.data.len(),
        },
    )
}

/// Crop the largest centred square out of a frame.
pub fn capture_square(frame: &Frame) -> Result<CapturedImage, ImagingError> {
    let crop = SquareCrop::centered(frame.width, frame.height)?;
    let source = frame_to_image(frame)?;
    let image = imageops::crop_imm(&source, crop.x, crop.y, crop.size, crop.size).to_image();
    Ok(CapturedImage { image, crop })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame whose red channel encodes the x coordinate and green the y.
    fn coordinate_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        Frame::rgb(width, height, data)
    }

    #[test]
    fn test_landscape_crop_offsets() {
        let crop = SquareCrop::centered(1280, 960).unwrap();
        assert_eq!(
            crop,
            SquareCrop {
                x: 160,
                y: 0,
                size: 960
            }
        );
    }

    #[test]
    fn test_portrait_crop_offsets() {
        let crop = SquareCrop::centered(720, 1280).unwrap();
        assert_eq!(crop.size, 720);
        assert_eq!(crop.x, 0);
        assert_eq!(crop.y, 280);
    }

    #[test]
    fn test_square_frame_is_untouched() {
        let crop = SquareCrop::centered(500, 500).unwrap();
        assert_eq!((crop.x, crop.y, crop.size), (0, 0, 500));
    }

    #[test]
    fn test_odd_leftover_floors_offset() {
        let crop = SquareCrop::centered(5, 2).unwrap();
        assert_eq!((crop.x, crop.y, crop.size), (1, 0, 2));
    }

    #[test]
    fn test_zero_sized_frame_is_rejected() {
        assert!(matches!(
            SquareCrop::centered(0, 10),
            Err(ImagingError::Empty { .. })
        ));
    }

    #[test]
    fn test_capture_square_copies_centre_region() {
        let frame = coordinate_frame(8, 4);
        let captured = capture_square(&frame).unwrap();

        assert_eq!(captured.image.dimensions(), (4, 4));
        // Top-left of the square is source pixel (2, 0)
        assert_eq!(captured.image.get_pixel(0, 0).0, [2, 0, 0]);
        assert_eq!(captured.image.get_pixel(3, 3).0, [5, 3, 0]);
    }

    #[test]
    fn test_frame_buffer_length_is_checked() {
        let frame = Frame::rgb(4, 4, vec![0; 10]);
        assert!(matches!(
            capture_square(&frame),
            Err(ImagingError::BufferMismatch {
                expected: 48,
                actual: 10
            })
        ));
    }
}
