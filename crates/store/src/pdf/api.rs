//! PDF Export Public API
//!
//! Writes a paginated raster as a PDF. The bitmap is embedded once and
//! every page references it.

use super::document::{create_catalog, create_pages, DocumentInfo};
use super::images::ImageData;
use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::options::PdfExportOptions;
use super::renderer::{RasterPageRenderer, IMAGE_RESOURCE, LABEL_FONT_RESOURCE};
use super::writer::{PdfError, PdfWriter, Result};
use image::RgbaImage;
use layout_engine::RasterLayout;
use std::io::Write;

/// Export a paginated raster to PDF bytes in memory
pub fn export_raster_pdf_bytes(
    layout: &RasterLayout,
    bitmap: &RgbaImage,
    options: &PdfExportOptions,
) -> Result<Vec<u8>> {
    write_raster_pdf(layout, bitmap, options, Vec::new())
}

/// Check that a layout and bitmap can be written
pub fn validate_layout(layout: &RasterLayout, bitmap: &RgbaImage) -> Result<()> {
    if layout.pages.is_empty() {
        return Err(PdfError::InvalidDocument("No pages to export".to_string()));
    }
    if bitmap.width() == 0 {
        return Err(PdfError::InvalidDocument("Bitmap has zero width".to_string()));
    }
    let geometry = &layout.geometry;
    if geometry.width.get() <= 0.0 || geometry.height.get() <= 0.0 {
        return Err(PdfError::InvalidDocument(format!(
            "Invalid page size: {} x {} mm",
            geometry.width.get(),
            geometry.height.get()
        )));
    }
    Ok(())
}

fn write_raster_pdf<W: Write>(
    layout: &RasterLayout,
    bitmap: &RgbaImage,
    options: &PdfExportOptions,
    out: W,
) -> Result<W> {
    validate_layout(layout, bitmap)?;

    let mut writer = PdfWriter::new(out);
    writer.set_compression(options.compress);
    writer.write_header()?;

    let catalog_ref = writer.allocate_object();
    let pages_ref = writer.allocate_object();
    let info_ref = writer.allocate_object();
    let image_ref = writer.allocate_object();

    let image = ImageData::from_rgba(bitmap);
    let mask_ref = match image.to_soft_mask() {
        Some(mask) => {
            let mask_ref = writer.allocate_object();
            writer.write_stream_object(mask_ref, mask)?;
            Some(mask_ref)
        }
        None => None,
    };
    writer.write_stream_object(image_ref, image.to_xobject(mask_ref))?;

    let has_labels = layout.pages.iter().any(|page| page.label.is_some());
    let font_ref = if has_labels {
        let font_ref = writer.allocate_object();
        writer.write_object(font_ref, &helvetica().into())?;
        Some(font_ref)
    } else {
        None
    };

    let resources = page_resources(image_ref, font_ref);
    let media_box = PdfObject::numbers(&[
        0.0,
        0.0,
        round_units(layout.geometry.width.to_pdf_units()),
        round_units(layout.geometry.height.to_pdf_units()),
    ]);

    let renderer = RasterPageRenderer::new(layout, options.label_font_size);
    let mut page_refs = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content_ref = writer.allocate_object();
        let page_ref = writer.allocate_object();

        let content = renderer.render(page);
        writer.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;

        let page_dict = PdfDictionary::typed("Page")
            .with("Parent", PdfObject::Reference(pages_ref))
            .with("MediaBox", media_box.clone())
            .with("Resources", resources.clone().into())
            .with("Contents", PdfObject::Reference(content_ref));
        writer.write_object(page_ref, &page_dict.into())?;
        page_refs.push(page_ref);
    }

    writer.write_object(pages_ref, &create_pages(&page_refs).into())?;
    writer.write_object(catalog_ref, &create_catalog(pages_ref).into())?;

    let mut info = DocumentInfo::new();
    if let Some(title) = &options.title {
        info = info.with_title(title.as_str());
    }
    writer.write_object(info_ref, &info.to_dictionary().into())?;
    writer.write_xref_and_trailer(catalog_ref, Some(info_ref))?;

    tracing::debug!(
        pages = page_refs.len(),
        width = bitmap.width(),
        height = bitmap.height(),
        soft_mask = mask_ref.is_some(),
        "Wrote raster PDF"
    );

    writer.finish()
}

fn helvetica() -> PdfDictionary {
    PdfDictionary::typed("Font")
        .with("Subtype", PdfObject::name("Type1"))
        .with("BaseFont", PdfObject::name("Helvetica"))
        .with("Encoding", PdfObject::name("WinAnsiEncoding"))
}

fn page_resources(image_ref: u32, font_ref: Option<u32>) -> PdfDictionary {
    let xobjects = PdfDictionary::new().with(IMAGE_RESOURCE, PdfObject::Reference(image_ref));
    let mut resources = PdfDictionary::new().with("XObject", xobjects.into());
    if let Some(font_ref) = font_ref {
        let fonts = PdfDictionary::new().with(LABEL_FONT_RESOURCE, PdfObject::Reference(font_ref));
        resources.insert("Font", fonts.into());
    }
    resources
}

/// Media box values rounded to 1/100 unit
fn round_units(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
