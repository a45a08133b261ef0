//! PDF Image Handling
//!
//! Splits an RGBA bitmap into an RGB image XObject and, when any pixel is
//! not fully opaque, a DeviceGray soft mask carrying the alpha channel.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use image::RgbaImage;

/// Raster image prepared for embedding
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples
    pub rgb: Vec<u8>,
    /// Packed 8-bit alpha samples, absent for opaque images
    pub alpha: Option<Vec<u8>>,
}

impl ImageData {
    pub fn from_rgba(bitmap: &RgbaImage) -> Self {
        let pixel_count = (bitmap.width() as usize) * (bitmap.height() as usize);
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        for pixel in bitmap.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let opaque = alpha.iter().all(|&a| a == u8::MAX);

        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            rgb,
            alpha: (!opaque).then_some(alpha),
        }
    }

    /// Image XObject for the color samples
    pub fn to_xobject(&self, soft_mask_ref: Option<u32>) -> PdfStream {
        let mut dict = self.image_dict("DeviceRGB");
        if let Some(mask_ref) = soft_mask_ref {
            dict.insert("SMask", PdfObject::Reference(mask_ref));
        }
        PdfStream::new(self.rgb.clone()).with_dict(dict)
    }

    /// Soft mask XObject for the alpha samples
    pub fn to_soft_mask(&self) -> Option<PdfStream> {
        self.alpha
            .as_ref()
            .map(|alpha| PdfStream::new(alpha.clone()).with_dict(self.image_dict("DeviceGray")))
    }

    fn image_dict(&self, color_space: &str) -> PdfDictionary {
        PdfDictionary::typed("XObject")
            .with("Subtype", PdfObject::name("Image"))
            .with("Width", PdfObject::Integer(i64::from(self.width)))
            .with("Height", PdfObject::Integer(i64::from(self.height)))
            .with("BitsPerComponent", PdfObject::Integer(8))
            .with("ColorSpace", PdfObject::name(color_space))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_opaque_image_has_no_mask() {
        let bitmap = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let data = ImageData::from_rgba(&bitmap);
        assert_eq!(data.rgb, vec![10, 20, 30, 10, 20, 30]);
        assert!(data.alpha.is_none());
        assert!(data.to_soft_mask().is_none());
    }

    #[test]
    fn test_translucent_image_gets_soft_mask() {
        let mut bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        bitmap.put_pixel(1, 1, Rgba([255, 255, 255, 0]));
        let data = ImageData::from_rgba(&bitmap);
        assert_eq!(data.alpha.as_deref(), Some(&[255, 255, 255, 0][..]));

        let xobject = data.to_xobject(Some(9));
        assert_eq!(xobject.dict.get("SMask"), Some(&PdfObject::Reference(9)));
        assert_eq!(xobject.dict.get("ColorSpace"), Some(&PdfObject::name("DeviceRGB")));

        let mask = data.to_soft_mask().unwrap();
        assert_eq!(mask.dict.get("ColorSpace"), Some(&PdfObject::name("DeviceGray")));
        assert_eq!(mask.data.len(), 4);
    }
}
