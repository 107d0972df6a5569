//! Image validation shared by the upload path.
//!
//! Thumbnail generation lives in the server (photos/processing.rs).

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::ImageError;

/// Allowed image formats for recipe cover photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Validate image data: check size and format, and detect the content type.
///
/// Returns the content type on success (e.g., "image/jpeg"). Only the magic
/// bytes are inspected; decoding happens when the thumbnail is rendered.
pub fn validate_image(data: &[u8]) -> Result<String, ImageError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(ImageError::TooLarge {
            size: data.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;

    let format = reader.format().ok_or(ImageError::UnknownFormat)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::Unsupported(format));
    }

    Ok(format.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::new(4, 4);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_validate_png() {
        let result = validate_image(&png_bytes()).unwrap();
        assert_eq!(result, "image/png");
    }

    #[test]
    fn test_validate_invalid_format() {
        let result = validate_image(b"not an image");
        assert!(matches!(result, Err(ImageError::UnknownFormat)));
    }

    #[test]
    fn test_validate_unsupported_format() {
        // BMP magic bytes are recognised but not accepted
        let result = validate_image(b"BM\0\0\0\0\0\0\0\0\0\0\0\0");
        assert!(matches!(
            result,
            Err(ImageError::Unsupported(ImageFormat::Bmp))
        ));
    }

    #[test]
    fn test_validate_too_large() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let result = validate_image(&data);
        assert!(matches!(result, Err(ImageError::TooLarge { .. })));
    }
}
