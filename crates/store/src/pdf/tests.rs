//! Tests for raster PDF export

use super::*;
use doc_model::{Orientation, PageGeometry, PageMargins, PageSizePreset, Pixels};
use image::{Rgba, RgbaImage};
use layout_engine::{RasterLayout, RasterPaginator};

fn a4() -> PageGeometry {
    PageGeometry::resolve(PageSizePreset::A4, Orientation::Portrait, &PageMargins::uniform(20.0)).unwrap()
}

fn paginate(bitmap: &RgbaImage, page_numbers: bool) -> RasterLayout {
    RasterPaginator::new(page_numbers)
        .paginate(Pixels(bitmap.width()), Pixels(bitmap.height()), &a4())
        .unwrap()
}

fn uncompressed() -> PdfExportOptions {
    PdfExportOptions::new().with_title("markdown-preview").with_compression(false)
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn test_pdf_structure() {
    let bitmap = RgbaImage::from_pixel(170, 100, Rgba([255, 255, 255, 255]));
    let layout = paginate(&bitmap, false);
    let bytes = export_raster_pdf_bytes(&layout, &bitmap, &uncompressed()).unwrap();
    let pdf = text(&bytes);

    assert!(pdf.starts_with("%PDF-1.4"));
    assert!(pdf.contains("/Type /Catalog"));
    assert!(pdf.contains("/Type /Pages /Kids ["));
    assert!(pdf.contains("/Count 1"));
    assert!(pdf.contains("/MediaBox [0 0 595.28 841.89]"));
    assert!(pdf.contains("/Title (markdown-preview)"));
    assert!(pdf.contains("/CreationDate (D:"));
    assert!(pdf.contains("startxref"));
    assert!(pdf.trim_end().ends_with("%%EOF"));
}

#[test]
fn test_image_is_shared_by_all_pages() {
    let bitmap = RgbaImage::from_pixel(170, 600, Rgba([0, 0, 0, 255]));
    let layout = paginate(&bitmap, false);
    assert_eq!(layout.page_count(), 3);

    let pdf = text(&export_raster_pdf_bytes(&layout, &bitmap, &uncompressed()).unwrap());
    assert_eq!(pdf.matches("/Subtype /Image").count(), 1);
    assert_eq!(pdf.matches("/Type /Page /Parent").count(), 3);
    assert_eq!(pdf.matches("/Im1 Do").count(), 3);
    assert!(!pdf.contains("/SMask"));
    assert!(!pdf.contains("/Font"));
}

#[test]
fn test_translucent_bitmap_gets_soft_mask() {
    let mut bitmap = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    bitmap.put_pixel(0, 0, Rgba([0, 0, 0, 128]));
    let layout = paginate(&bitmap, false);

    let pdf = text(&export_raster_pdf_bytes(&layout, &bitmap, &uncompressed()).unwrap());
    assert!(pdf.contains("/SMask"));
    assert!(pdf.contains("/ColorSpace /DeviceGray"));
}

#[test]
fn test_page_labels_use_helvetica() {
    let bitmap = RgbaImage::from_pixel(170, 300, Rgba([255, 255, 255, 255]));
    let layout = paginate(&bitmap, true);

    let pdf = text(&export_raster_pdf_bytes(&layout, &bitmap, &uncompressed()).unwrap());
    assert!(pdf.contains("/BaseFont /Helvetica"));
    assert!(pdf.contains("(Page 1) Tj"));
    assert!(pdf.contains("(Page 2) Tj"));
}

#[test]
fn test_compressed_output_uses_flate() {
    let bitmap = RgbaImage::from_pixel(170, 100, Rgba([255, 255, 255, 255]));
    let layout = paginate(&bitmap, false);
    let bytes = export_raster_pdf_bytes(&layout, &bitmap, &PdfExportOptions::default()).unwrap();
    let pdf = text(&bytes);
    assert!(pdf.contains("/Filter /FlateDecode"));
    assert!(!pdf.contains("/Im1 Do"));
}

#[test]
fn test_empty_layout_is_rejected() {
    let bitmap = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let mut layout = paginate(&bitmap, false);
    layout.pages.clear();
    let result = export_raster_pdf_bytes(&layout, &bitmap, &PdfExportOptions::default());
    assert!(matches!(result, Err(PdfError::InvalidDocument(_))));
}
