//! Error types for storage and packaging operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    #[error("Image error: {0}")]
    Image(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] crate::pdf::PdfError),

    #[error("DOCX error: {0}")]
    Docx(#[from] crate::docx::DocxError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
