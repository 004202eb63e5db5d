//! JPEG encoding and data URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageFormat, RgbImage};

use super::ImagingError;

pub const JPEG_MIME: &str = "image/jpeg";

/// Same default a browser canvas uses for `toDataURL("image/jpeg")`.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encode RGB pixels as a baseline JPEG.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ImagingError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImagingError::Empty { width, height });
    }

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    encoder
        .encode(image.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| ImagingError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// `data:<mime>;base64,<payload>`
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Encode as JPEG and wrap in a data URL.
pub fn jpeg_data_url(image: &RgbImage, quality: u8) -> Result<String, ImagingError> {
    let bytes = encode_jpeg(image, quality)?;
    Ok(to_data_url(JPEG_MIME, &bytes))
}

/// Split a base64 data URL into its MIME type and decoded bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), ImagingError> {
    let rest = url.strip_prefix("data:").ok_or(ImagingError::InvalidDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(ImagingError::InvalidDataUrl)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(ImagingError::InvalidDataUrl)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ImagingError::Decode(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// MIME type to announce for an uploaded file of the given format.
pub fn mime_for_format(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => JPEG_MIME,
        ImageFormat::Png => "image/png",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_encode_jpeg_produces_jpeg_magic() {
        let image = RgbImage::from_pixel(16, 16, Rgb([200, 10, 10]));
        let bytes = encode_jpeg(&image, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_jpeg_data_url_prefix_and_dimensions() {
        let image = RgbImage::from_pixel(12, 12, Rgb([0, 128, 0]));
        let url = jpeg_data_url(&image, 85).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, JPEG_MIME);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 12));
    }

    #[test]
    fn test_decode_data_url_rejects_plain_strings() {
        assert!(matches!(
            decode_data_url("hello"),
            Err(ImagingError::InvalidDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:image/png,rawdata"),
            Err(ImagingError::InvalidDataUrl)
        ));
    }

    #[test]
    fn test_mime_for_format() {
        assert_eq!(mime_for_format(ImageFormat::Png), "image/png");
        assert_eq!(mime_for_format(ImageFormat::Jpeg), "image/jpeg");
    }
}
