//! Raster Pagination
//!
//! Slices one tall rendered image across fixed-size pages. The image is
//! scaled to the content width of the page; every page shows the whole
//! image shifted up by the height of the pages before it, so each page
//! exposes the next band of the image through its content area.
//!
//! The loop keeps going while the remaining height is non-negative, which
//! means an image whose height is an exact multiple of the content height
//! gets one trailing blank page.

use crate::{LayoutError, Result};
use doc_model::{Millimeters, PageGeometry, Pixels};
use serde::{Deserialize, Serialize};

/// Horizontal distance of the page label from the right margin edge
pub const LABEL_INSET_X: Millimeters = Millimeters(20.0);

/// Vertical distance of the page label baseline from the bottom page edge
pub const LABEL_INSET_Y: Millimeters = Millimeters(10.0);

/// A page number label positioned from the top-left corner of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLabel {
    pub text: String,
    pub x: Millimeters,
    pub y: Millimeters,
}

/// One output page of a paginated raster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterPage {
    /// 1-based page number
    pub number: usize,
    /// How far the image is shifted up within the content area
    pub image_offset: Millimeters,
    pub label: Option<PageLabel>,
}

/// The full pagination of one raster image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterLayout {
    pub geometry: PageGeometry,
    /// Rendered image width, always the content width
    pub image_width: Millimeters,
    /// Rendered image height at that width
    pub image_height: Millimeters,
    pub pages: Vec<RasterPage>,
}

impl RasterLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Distance from the top of the page to the top edge of the image on `page`.
    /// Negative once the image has scrolled past the top margin.
    pub fn image_top(&self, page: &RasterPage) -> Millimeters {
        self.geometry.margins.top - page.image_offset
    }
}

/// Paginates rasterized bitmaps over a page geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterPaginator {
    page_numbers: bool,
}

impl RasterPaginator {
    pub fn new(page_numbers: bool) -> Self {
        Self { page_numbers }
    }

    /// Lay out a `width` x `height` pixel bitmap over pages of `geometry`
    pub fn paginate(&self, width: Pixels, height: Pixels, geometry: &PageGeometry) -> Result<RasterLayout> {
        if width.get() == 0 {
            return Err(LayoutError::InvalidBitmap(
                "bitmap has zero width, scale is undefined".to_string(),
            ));
        }

        let content_width = geometry.content_width;
        let content_height = geometry.content_height;
        let image_height = Millimeters(
            f64::from(height.get()) * (content_width.get() / f64::from(width.get())),
        );

        let mut pages = Vec::new();
        let mut offset = Millimeters::ZERO;
        let mut remaining = image_height;

        while remaining.get() >= 0.0 {
            let number = pages.len() + 1;
            pages.push(RasterPage {
                number,
                image_offset: offset,
                label: self.page_numbers.then(|| page_label(number, geometry)),
            });
            offset = offset + content_height;
            remaining = remaining - content_height;
        }

        tracing::debug!(
            width = width.get(),
            height = height.get(),
            image_height_mm = image_height.get(),
            pages = pages.len(),
            "Paginated raster image"
        );

        Ok(RasterLayout {
            geometry: *geometry,
            image_width: content_width,
            image_height,
            pages,
        })
    }
}

fn page_label(number: usize, geometry: &PageGeometry) -> PageLabel {
    PageLabel {
        text: format!("Page {}", number),
        x: geometry.width - geometry.margins.right - LABEL_INSET_X,
        y: geometry.height - LABEL_INSET_Y,
    }
}
