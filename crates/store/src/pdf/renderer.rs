//! Raster page renderer
//!
//! Produces the content stream of one page of a paginated raster. User
//! space is scaled so that one unit is one millimeter; every page draws the
//! same image XObject shifted by its offset and clipped to the content band.

use super::content::ContentStream;
use doc_model::PDF_UNITS_PER_MM;
use layout_engine::{RasterLayout, RasterPage};

/// Resource name of the shared page image
pub const IMAGE_RESOURCE: &str = "Im1";

/// Resource name of the page label font
pub const LABEL_FONT_RESOURCE: &str = "F1";

/// Gray level used for page labels
const LABEL_GRAY: f64 = 0.4;

pub struct RasterPageRenderer<'a> {
    layout: &'a RasterLayout,
    /// Label size in points
    label_font_size: f64,
}

impl<'a> RasterPageRenderer<'a> {
    pub fn new(layout: &'a RasterLayout, label_font_size: f64) -> Self {
        Self {
            layout,
            label_font_size,
        }
    }

    /// Build the content stream for `page`
    pub fn render(&self, page: &RasterPage) -> ContentStream {
        let geometry = &self.layout.geometry;
        let page_height = geometry.height.get();
        let margins = &geometry.margins;

        let mut content = ContentStream::new();
        content.save_state().scale(PDF_UNITS_PER_MM);

        // PDF origin is bottom-left, layout positions are measured from the top
        let image_bottom =
            page_height - self.layout.image_top(page).get() - self.layout.image_height.get();

        content
            .save_state()
            .rect(
                margins.left.get(),
                margins.bottom.get(),
                geometry.content_width.get(),
                geometry.content_height.get(),
            )
            .clip()
            .end_path()
            .transform(
                self.layout.image_width.get(),
                0.0,
                0.0,
                self.layout.image_height.get(),
                margins.left.get(),
                image_bottom,
            )
            .draw_xobject(IMAGE_RESOURCE)
            .restore_state();

        if let Some(label) = &page.label {
            content
                .set_fill_gray(LABEL_GRAY)
                .begin_text()
                .set_font(LABEL_FONT_RESOURCE, self.label_font_size / PDF_UNITS_PER_MM)
                .move_text(label.x.get(), page_height - label.y.get())
                .show_text(&label.text)
                .end_text();
        }

        content.restore_state();
        content
    }
}
