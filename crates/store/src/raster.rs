//! PNG encoding of rasterized previews

use crate::{Result, StoreError};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageFormat, RgbaImage};

/// Encode an RGBA bitmap as PNG bytes
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(StoreError::Image(format!(
            "cannot encode an empty {}x{} bitmap",
            bitmap.width(),
            bitmap.height()
        )));
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(bitmap.as_raw(), bitmap.width(), bitmap.height(), ColorType::Rgba8)
        .map_err(|e| StoreError::Image(e.to_string()))?;

    tracing::debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        bytes = bytes.len(),
        "Encoded PNG"
    );
    Ok(bytes)
}

/// Decode PNG bytes into an RGBA bitmap
pub fn decode_png(data: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory_with_format(data, ImageFormat::Png)
        .map_err(|e| StoreError::Image(format!("failed to decode PNG: {}", e)))?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_signature() {
        let bitmap = RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 255]));
        let bytes = encode_png(&bitmap).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]));
    }

    #[test]
    fn test_pixels_survive_encoding() {
        let mut bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        bitmap.put_pixel(1, 0, Rgba([10, 20, 30, 128]));

        let decoded = decode_png(&encode_png(&bitmap).unwrap()).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0), &Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn test_empty_bitmap_rejected() {
        let bitmap = RgbaImage::new(0, 5);
        assert!(matches!(encode_png(&bitmap), Err(StoreError::Image(_))));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_png(b"not a png"), Err(StoreError::Image(_))));
    }
}
