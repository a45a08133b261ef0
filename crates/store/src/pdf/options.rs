//! PDF Export Options

use serde::{Deserialize, Serialize};

/// Options for raster PDF export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    /// Whether to compress streams
    #[serde(default = "default_compress")]
    pub compress: bool,
    /// Page label size in points
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
}

fn default_compress() -> bool {
    true
}

fn default_label_font_size() -> f64 {
    10.0
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            compress: default_compress(),
            label_font_size: default_label_font_size(),
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}
