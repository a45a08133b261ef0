//! DOCX Export Module
//!
//! Assembles the block/run model into a structured document and packages
//! it as a Microsoft Word DOCX file. DOCX is based on the Office Open XML
//! (OOXML) format defined in ECMA-376.
//!
//! ## Structure
//!
//! A DOCX file is a ZIP archive containing XML files:
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `word/document.xml` - Main document content
//! - `word/styles.xml` - Style definitions
//! - `word/settings.xml` - Document settings
//! - `word/_rels/document.xml.rels` - Document relationships

mod error;
mod content_types;
mod relationships;
mod document;
mod assembler;
mod writer;
mod document_writer;
mod styles_writer;
mod api;

pub use error::{DocxError, DocxResult};
pub use api::{export_docx_bytes, FileFormat};
pub use assembler::{DocumentAssembler, PAGE_NUMBER_NOTE, TOC_NOTE, TOC_TITLE};
pub use document::{
    DocParagraph, DocRun, ParagraphStyle, SectionSetup, StructuredDocument,
    BODY_SPACING_AFTER, HEADING_SPACING_AFTER, HEADING_SPACING_BEFORE,
};

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}
