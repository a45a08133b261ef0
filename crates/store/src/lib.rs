//! Store - Artifact packaging and persistence
//!
//! This crate turns export results into bytes and keeps session state on
//! disk: PNG encoding of rendered previews, PDF writing of paginated
//! rasters, DOCX assembly and packaging of the block/run model, the
//! namespaced key-value store and the export preferences file.

mod error;
mod settings;
mod kv_store;
mod raster;
pub mod pdf;
pub mod docx;

pub use error::*;
pub use settings::*;
pub use kv_store::*;
pub use raster::*;

// Re-export packaging entry points
pub use docx::{
    export_docx_bytes, DocumentAssembler, DocxError, DocxResult, FileFormat,
    StructuredDocument,
};
pub use pdf::{export_raster_pdf_bytes, PdfError, PdfExportOptions};
