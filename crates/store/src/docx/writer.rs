//! DOCX package writer
//!
//! A DOCX file is a ZIP archive of XML parts. The parts are rendered first
//! and then written in package order, content types leading.

use crate::docx::content_types::create_default_content_types;
use crate::docx::document::StructuredDocument;
use crate::docx::document_writer::DocumentWriter;
use crate::docx::error::DocxResult;
use crate::docx::relationships::{create_document_rels, create_root_rels};
use crate::docx::styles_writer::StylesWriter;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Default tab stop in twentieths of a point (half an inch)
const DEFAULT_TAB_STOP: u32 = 720;

/// Word 2013 and later layout rules
const COMPATIBILITY_MODE: u32 = 15;

/// One named XML part of the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePart {
    pub name: &'static str,
    pub xml: String,
}

/// Render every part of the package for `doc`, in archive order
pub fn package_parts(doc: &StructuredDocument) -> Vec<PackagePart> {
    let part = |name, xml| PackagePart { name, xml };
    vec![
        part("[Content_Types].xml", create_default_content_types().to_xml()),
        part("_rels/.rels", create_root_rels().to_xml()),
        part("word/document.xml", DocumentWriter::new().write(doc)),
        part("word/styles.xml", StylesWriter::new().write(doc)),
        part("word/settings.xml", settings_xml()),
        part("word/_rels/document.xml.rels", create_document_rels().to_xml()),
    ]
}

/// Writes a structured document as a DOCX archive
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
}

impl<W: Write + Seek> DocxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write all parts and return the finished writer
    pub fn write(mut self, doc: &StructuredDocument) -> DocxResult<W> {
        let parts = package_parts(doc);
        for part in &parts {
            self.zip.start_file(part.name, self.options)?;
            self.zip.write_all(part.xml.as_bytes())?;
        }
        tracing::debug!(parts = parts.len(), paragraphs = doc.paragraphs.len(), "Wrote DOCX package");
        Ok(self.zip.finish()?)
    }
}

fn settings_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:settings xmlns:w="{ns}">"#,
            r#"<w:defaultTabStop w:val="{tab}"/>"#,
            r#"<w:compat><w:compatSetting w:name="compatibilityMode" "#,
            r#"w:uri="http://schemas.microsoft.com/office/word" w:val="{mode}"/></w:compat>"#,
            "</w:settings>"
        ),
        ns = crate::docx::namespaces::W,
        tab = DEFAULT_TAB_STOP,
        mode = COMPATIBILITY_MODE,
    )
}
