//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Invalid page geometry: content area {content_width}mm x {content_height}mm")]
    InvalidGeometry {
        content_width: f64,
        content_height: f64,
    },

    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),

    #[error("Unknown orientation: {0}")]
    UnknownOrientation(String),

    #[error("Markup parse error: {0}")]
    MarkupParse(String),
}

impl From<quick_xml::Error> for DocModelError {
    fn from(err: quick_xml::Error) -> Self {
        DocModelError::MarkupParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocModelError>;
