//! Document.xml writer
//!
//! Converts a StructuredDocument to DOCX document.xml format.

use crate::docx::document::{DocParagraph, DocRun, SectionSetup, StructuredDocument};
use crate::docx::namespaces;
use doc_model::Orientation;
use quick_xml::escape::escape;

/// Writer for document.xml
#[derive(Debug, Default)]
pub struct DocumentWriter;

impl DocumentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate document.xml content
    pub fn write(&self, doc: &StructuredDocument) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));
        xml.push_str("<w:body>");

        for paragraph in &doc.paragraphs {
            self.write_paragraph(&mut xml, paragraph);
        }

        // Section properties must be the last child of the body
        self.write_section_properties(&mut xml, &doc.section);

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");
        xml
    }

    fn write_paragraph(&self, xml: &mut String, paragraph: &DocParagraph) {
        xml.push_str("<w:p>");

        xml.push_str("<w:pPr>");
        xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, paragraph.style.style_id()));
        if paragraph.spacing_before.is_some() || paragraph.spacing_after.is_some() {
            xml.push_str("<w:spacing");
            if let Some(before) = paragraph.spacing_before {
                xml.push_str(&format!(r#" w:before="{}""#, before));
            }
            if let Some(after) = paragraph.spacing_after {
                xml.push_str(&format!(r#" w:after="{}""#, after));
            }
            xml.push_str("/>");
        }
        xml.push_str("</w:pPr>");

        for run in &paragraph.runs {
            self.write_run(xml, run);
        }

        xml.push_str("</w:p>");
    }

    fn write_run(&self, xml: &mut String, run: &DocRun) {
        xml.push_str("<w:r>");
        self.write_run_properties(xml, run);

        for (i, part) in run.text.split('\n').enumerate() {
            if i > 0 {
                xml.push_str("<w:br/>");
            }
            if part.is_empty() {
                continue;
            }
            // Leading/trailing spaces are dropped by readers unless preserved
            if part.starts_with(' ') || part.ends_with(' ') {
                xml.push_str(r#"<w:t xml:space="preserve">"#);
            } else {
                xml.push_str("<w:t>");
            }
            xml.push_str(&escape(part));
            xml.push_str("</w:t>");
        }

        xml.push_str("</w:r>");
    }

    fn write_run_properties(&self, xml: &mut String, run: &DocRun) {
        xml.push_str("<w:rPr>");

        let font = escape(run.font.as_str());
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{}" w:hAnsi="{}" w:cs="{}"/>"#,
            font, font, font
        ));
        if run.bold {
            xml.push_str("<w:b/>");
        }
        if run.italic {
            xml.push_str("<w:i/>");
        }
        let half_points = run.size.rounded();
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, half_points));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, half_points));

        xml.push_str("</w:rPr>");
    }

    fn write_section_properties(&self, xml: &mut String, section: &SectionSetup) {
        xml.push_str("<w:sectPr>");

        xml.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}""#,
            section.page_width.rounded(),
            section.page_height.rounded()
        ));
        if section.orientation == Orientation::Landscape {
            xml.push_str(r#" w:orient="landscape""#);
        }
        xml.push_str("/>");

        xml.push_str(&format!(
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="0" w:footer="0" w:gutter="0"/>"#,
            section.margin_top.rounded(),
            section.margin_right.rounded(),
            section.margin_bottom.rounded(),
            section.margin_left.rounded()
        ));

        xml.push_str("</w:sectPr>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::document::{DocParagraph, ParagraphStyle};
    use doc_model::{HalfPoints, HeadingLevel, Millimeters, Points};

    fn run(text: &str) -> DocRun {
        DocRun {
            text: text.to_string(),
            font: "Arial".to_string(),
            size: HalfPoints(24.0),
            bold: false,
            italic: false,
        }
    }

    fn document(paragraphs: Vec<DocParagraph>, orientation: Orientation) -> StructuredDocument {
        let mm = |v: f64| Millimeters(v).to_points();
        StructuredDocument {
            section: SectionSetup {
                page_width: mm(210.0),
                page_height: mm(297.0),
                content_width: mm(170.0),
                content_height: mm(257.0),
                margin_top: mm(20.0),
                margin_bottom: mm(20.0),
                margin_left: mm(20.0),
                margin_right: mm(20.0),
                orientation,
            },
            paragraphs,
            font_family: "Arial".to_string(),
            font_size: Points(12.0).to_half_points(),
            line_height: 1.5,
        }
    }

    #[test]
    fn test_heading_paragraph() {
        let heading = DocParagraph::heading(HeadingLevel::new(2).unwrap(), vec![run("Title")]);
        let xml = DocumentWriter::new().write(&document(vec![heading], Orientation::Portrait));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/><w:spacing w:before="240" w:after="120"/>"#));
        assert!(xml.contains("<w:t>Title</w:t>"));
    }

    #[test]
    fn test_body_run_properties() {
        let mut bold = run("b & i");
        bold.bold = true;
        bold.italic = true;
        let body = DocParagraph::body(vec![bold]);
        assert_eq!(body.style, ParagraphStyle::Normal);

        let xml = DocumentWriter::new().write(&document(vec![body], Orientation::Portrait));
        assert!(xml.contains(r#"<w:spacing w:after="120"/>"#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:b/><w:i/><w:sz w:val="24"/>"#));
        assert!(xml.contains("<w:t>b &amp; i</w:t>"));
    }

    #[test]
    fn test_newlines_become_breaks() {
        let body = DocParagraph::body(vec![run("a\nb"), run("\n"), run(" c ")]);
        let xml = DocumentWriter::new().write(&document(vec![body], Orientation::Portrait));
        assert!(xml.contains("<w:t>a</w:t><w:br/><w:t>b</w:t>"));
        assert!(xml.contains(r#"<w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr><w:br/></w:r>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve"> c </w:t>"#));
    }

    #[test]
    fn test_section_properties() {
        let xml = DocumentWriter::new().write(&document(vec![], Orientation::Portrait));
        // 210mm * 28.35 = 5953.5, 297mm * 28.35 = 8419.95, 20mm * 28.35 = 567
        assert!(xml.contains(r#"<w:pgSz w:w="5954" w:h="8420"/>"#));
        assert!(xml.contains(r#"<w:pgMar w:top="567" w:right="567" w:bottom="567" w:left="567""#));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_landscape_orientation() {
        let xml = DocumentWriter::new().write(&document(vec![], Orientation::Landscape));
        assert!(xml.contains(r#"w:orient="landscape""#));
    }
}
