use std::io::Cursor;

use cookbook_core::{validate_image, ImageError};
use image::{DynamicImage, ImageFormat, ImageReader};

pub const THUMBNAIL_SIZE: u32 = 200;
pub const MAX_THUMBNAIL_SIZE: u32 = 800;

/// Validate an upload and render its default thumbnail.
/// Returns (content_type, thumbnail_bytes) on success.
pub fn process_image(data: &[u8]) -> Result<(String, Vec<u8>), ImageError> {
    let content_type = validate_image(data)?;
    let img = decode(data)?;
    let thumbnail = encode_thumbnail(&img, THUMBNAIL_SIZE)?;
    Ok((content_type, thumbnail))
}

/// Generate a thumbnail at a specific size from raw image data.
/// Returns JPEG bytes.
pub fn generate_thumbnail(data: &[u8], size: u32) -> Result<Vec<u8>, ImageError> {
    let img = decode(data)?;
    encode_thumbnail(&img, size.clamp(1, MAX_THUMBNAIL_SIZE))
}

fn decode(data: &[u8]) -> Result<DynamicImage, ImageError> {
    Ok(ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?)
}

fn encode_thumbnail(img: &DynamicImage, size: u32) -> Result<Vec<u8>, ImageError> {
    // thumbnail() preserves aspect ratio, fitting within the given dimensions.
    // JPEG has no alpha channel, so flatten to RGB first.
    let thumbnail = DynamicImage::ImageRgb8(img.thumbnail(size, size).to_rgb8());

    let mut buf = Cursor::new(Vec::new());
    thumbnail.write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn dimensions(jpeg: &[u8]) -> (u32, u32) {
        image::load_from_memory_with_format(jpeg, ImageFormat::Jpeg)
            .unwrap()
            .dimensions()
    }

    #[test]
    fn test_process_image_png_with_alpha() {
        let (content_type, thumbnail) = process_image(&png_bytes(400, 100)).unwrap();
        assert_eq!(content_type, "image/png");
        assert_eq!(dimensions(&thumbnail), (200, 50));
    }

    #[test]
    fn test_process_image_rejects_garbage() {
        assert!(process_image(b"definitely not an image").is_err());
    }

    #[test]
    fn test_generate_thumbnail_clamps_size() {
        let data = png_bytes(2000, 1000);
        assert_eq!(dimensions(&generate_thumbnail(&data, 5000).unwrap()), (800, 400));
        assert_eq!(dimensions(&generate_thumbnail(&data, 0).unwrap()).0, 1);
    }
}
