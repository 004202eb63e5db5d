//! Fit-and-pad preview for uploaded images.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};

use super::ImagingError;

/// Edge length of the square upload preview.
pub const PREVIEW_SIZE: u32 = 300;

/// Where a scaled image sits on the square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Scale `width x height` uniformly to fit inside `size x size` and centre it.
pub fn fit_placement(width: u32, height: u32, size: u32) -> Result<Placement, ImagingError> {
    if width == 0 || height == 0 || size == 0 {
        return Err(ImagingError::Empty { width, height });
    }

    let scale = (size as f64 / width as f64).min(size as f64 / height as f64);
    let scaled_width = ((width as f64 * scale).round() as u32).clamp(1, size);
    let scaled_height = ((height as f64 * scale).round() as u32).clamp(1, size);

    Ok(Placement {
        x: (size - scaled_width) / 2,
        y: (size - scaled_height) / 2,
        width: scaled_width,
        height: scaled_height,
    })
}

/// Letterbox `image` onto a white `size x size` canvas.
///
/// Transparent areas of the source end up white as well.
pub fn letterbox(image: &DynamicImage, size: u32) -> Result<RgbImage, ImagingError> {
    let placement = fit_placement(image.width(), image.height(), size)?;
    let scaled = imageops::resize(
        &image.to_rgba8(),
        placement.width,
        placement.height,
        FilterType::Triangle,
    );

    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
    imageops::overlay(
        &mut canvas,
        &scaled,
        placement.x as i64,
        placement.y as i64,
    );
    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_wide_image_is_padded_top_and_bottom() {
        let placement = fit_placement(600, 300, PREVIEW_SIZE).unwrap();
        assert_eq!(
            placement,
            Placement {
                x: 0,
                y: 75,
                width: 300,
                height: 150
            }
        );
    }

    #[test]
    fn test_tall_image_is_padded_left_and_right() {
        let placement = fit_placement(100, 400, PREVIEW_SIZE).unwrap();
        assert_eq!(placement.width, 75);
        assert_eq!(placement.height, 300);
        assert_eq!(placement.x, 112);
        assert_eq!(placement.y, 0);
    }

    #[test]
    fn test_small_image_is_scaled_up() {
        let placement = fit_placement(30, 30, PREVIEW_SIZE).unwrap();
        assert_eq!((placement.width, placement.height), (300, 300));
        assert_eq!((placement.x, placement.y), (0, 0));
    }

    #[test]
    fn test_aspect_ratio_is_preserved() {
        for (w, h) in [(1920, 1080), (640, 480), (333, 1000), (7, 3)] {
            let p = fit_placement(w, h, PREVIEW_SIZE).unwrap();
            let source = w as f64 / h as f64;
            let scaled = p.width as f64 / p.height as f64;
            // Within one pixel of rounding on the short side
            let tolerance = 1.0 / p.width.min(p.height) as f64 * source.max(1.0);
            assert!(
                (source - scaled).abs() <= tolerance,
                "{}x{} -> {}x{}",
                w,
                h,
                p.width,
                p.height
            );
        }
    }

    #[test]
    fn test_letterbox_output_is_exact_square_with_white_bars() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(600, 300, Rgb([0, 0, 0])));
        let preview = letterbox(&source, PREVIEW_SIZE).unwrap();

        assert_eq!(preview.dimensions(), (300, 300));
        assert_eq!(preview.get_pixel(150, 10).0, [255, 255, 255]);
        assert_eq!(preview.get_pixel(150, 290).0, [255, 255, 255]);
        assert_eq!(preview.get_pixel(150, 150).0, [0, 0, 0]);
    }

    #[test]
    fn test_transparent_pixels_become_white() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0])));
        let preview = letterbox(&source, 20).unwrap();
        assert_eq!(preview.get_pixel(10, 10).0, [255, 255, 255]);
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        assert!(fit_placement(0, 10, PREVIEW_SIZE).is_err());
    }
}
