//! Error types for layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid bitmap: {0}")]
    InvalidBitmap(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
