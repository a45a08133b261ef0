//! Error types for export operations

use doc_model::DocModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(DocModelError),

    #[error("Rasterization failed: {0}")]
    RasterizationFailure(String),

    #[error("Packaging failed: {0}")]
    PackagingFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocModelError> for ExportError {
    fn from(err: DocModelError) -> Self {
        match err {
            DocModelError::InvalidGeometry { .. } => ExportError::InvalidGeometry(err),
            other => ExportError::PackagingFailure(other.to_string()),
        }
    }
}

impl From<layout_engine::LayoutError> for ExportError {
    fn from(err: layout_engine::LayoutError) -> Self {
        ExportError::RasterizationFailure(err.to_string())
    }
}

impl From<store::StoreError> for ExportError {
    fn from(err: store::StoreError) -> Self {
        match err {
            store::StoreError::Io(e) => ExportError::Io(e),
            other => ExportError::PackagingFailure(other.to_string()),
        }
    }
}

impl From<store::PdfError> for ExportError {
    fn from(err: store::PdfError) -> Self {
        ExportError::PackagingFailure(err.to_string())
    }
}

impl From<store::DocxError> for ExportError {
    fn from(err: store::DocxError) -> Self {
        ExportError::PackagingFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
