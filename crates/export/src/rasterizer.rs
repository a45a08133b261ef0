//! Rasterizer collaborator
//!
//! Turning a markup tree into pixels happens outside this workspace. The
//! pipeline only needs an RGBA bitmap back, rendered at a fixed scale.

use doc_model::MarkupNode;
use image::RgbaImage;

/// Device pixel scale every export rasterizes at
pub const RASTER_SCALE: f64 = 2.0;

/// Background of unstyled rasterizations
pub const WHITE: &str = "#ffffff";

/// How a tree should be rasterized
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub scale: f64,
    /// CSS color painted behind the tree
    pub background: String,
}

impl RasterOptions {
    pub fn with_background(background: impl Into<String>) -> Self {
        Self {
            scale: RASTER_SCALE,
            background: background.into(),
        }
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self::with_background(WHITE)
    }
}

/// Renders a markup tree to an RGBA bitmap.
///
/// Implementations report failures as a message; the pipeline turns it
/// into a rasterization failure.
#[trait_variant::make(Send)]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, tree: &MarkupNode, options: &RasterOptions) -> Result<RgbaImage, String>;
}

/// Rasterizer that returns a bitmap rendered ahead of time
#[derive(Debug, Clone)]
pub struct PrerenderedRasterizer {
    bitmap: RgbaImage,
}

impl PrerenderedRasterizer {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self { bitmap }
    }
}

impl Rasterizer for PrerenderedRasterizer {
    async fn rasterize(&self, _tree: &MarkupNode, options: &RasterOptions) -> Result<RgbaImage, String> {
        tracing::debug!(
            width = self.bitmap.width(),
            height = self.bitmap.height(),
            background = %options.background,
            "Using prerendered bitmap"
        );
        Ok(self.bitmap.clone())
    }
}
