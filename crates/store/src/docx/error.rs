//! Error types for DOCX export

use thiserror::Error;

/// Errors that can occur while packaging a DOCX file
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid document structure
    #[error("Invalid DOCX structure: {0}")]
    InvalidStructure(String),
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
