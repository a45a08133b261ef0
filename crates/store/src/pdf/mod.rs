//! PDF Export Module
//!
//! Writes a paginated raster of the preview as a PDF file.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: Catalog, page tree and document info
//! - `content`: Content stream operators
//! - `images`: Image and soft mask XObjects from an RGBA bitmap
//! - `renderer`: Per-page content for a paginated raster
//! - `options`: PDF export configuration
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod images;
mod objects;
mod options;
mod renderer;
mod writer;

pub use api::*;
pub use document::pdf_date;
pub use options::*;
pub use writer::PdfError;

#[cfg(test)]
mod tests;
