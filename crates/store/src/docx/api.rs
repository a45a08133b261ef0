//! Public API for DOCX export
//!
//! Packages a StructuredDocument as DOCX bytes, plus the export formats the
//! pipeline produces.

use crate::docx::document::StructuredDocument;
use crate::docx::error::DocxResult;
use crate::docx::writer::DocxWriter;
use std::io::Cursor;

/// Export a StructuredDocument to an in-memory byte vector
pub fn export_docx_bytes(doc: &StructuredDocument) -> DocxResult<Vec<u8>> {
    let writer = DocxWriter::new(Cursor::new(Vec::new()));
    let cursor = writer.write(doc)?;
    Ok(cursor.into_inner())
}

/// Export formats produced by the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Rasterized preview image
    Png,
    /// Paginated raster document
    Pdf,
    /// Microsoft Word DOCX format (Office Open XML)
    Docx,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Png => "png",
            FileFormat::Pdf => "pdf",
            FileFormat::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Png => "image/png",
            FileFormat::Pdf => "application/pdf",
            FileFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::assembler::DocumentAssembler;
    use doc_model::{Block, HeadingLevel, PageSetup, Run, TextRun};
    use std::io::Read;

    fn sample() -> StructuredDocument {
        let setup = PageSetup::default();
        let blocks = vec![
            Block::Heading {
                level: HeadingLevel::new(1).unwrap(),
                runs: vec![Run::Text(TextRun::plain("Notes"))],
            },
            Block::Paragraph {
                runs: vec![Run::Text(TextRun::italic("body"))],
            },
        ];
        DocumentAssembler::new().assemble(&blocks, &setup.geometry().unwrap(), &setup)
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_export_bytes_contains_all_parts() {
        let bytes = export_docx_bytes(&sample()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/settings.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_exported_document_content() {
        let bytes = export_docx_bytes(&sample()).unwrap();
        let document = read_part(&bytes, "word/document.xml");
        assert!(document.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(document.contains("<w:t>Notes</w:t>"));
        assert!(document.contains("<w:i/>"));
        assert!(document.contains(r#"<w:sz w:val="24"/>"#));

        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains("/word/document.xml"));
    }

    #[test]
    fn test_file_format_names() {
        assert_eq!(FileFormat::Png.mime_type(), "image/png");
        assert_eq!(FileFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(FileFormat::Docx.extension(), "docx");
    }
}
