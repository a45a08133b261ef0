//! Styles.xml writer
//!
//! Declares document defaults from the page setup font plus the Normal and
//! Heading1..Heading6 paragraph styles referenced by document.xml.

use crate::docx::document::StructuredDocument;
use crate::docx::namespaces;
use quick_xml::escape::escape;

/// Heading sizes relative to the body size, Heading1 first
const HEADING_SCALE: [f64; 6] = [2.0, 1.5, 1.25, 1.1, 1.0, 0.9];

/// Writer for styles.xml
#[derive(Debug, Default)]
pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml content
    pub fn write(&self, doc: &StructuredDocument) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        self.write_doc_defaults(&mut xml, doc);
        self.write_normal_style(&mut xml);
        for (index, scale) in HEADING_SCALE.iter().enumerate() {
            let size = (doc.font_size.get() * scale).round() as u32;
            self.write_heading_style(&mut xml, index + 1, size);
        }

        xml.push_str("</w:styles>");
        xml
    }

    fn write_doc_defaults(&self, xml: &mut String, doc: &StructuredDocument) {
        let font = escape(doc.font_family.as_str());
        let size = doc.font_size.rounded();

        xml.push_str("<w:docDefaults>");
        xml.push_str("<w:rPrDefault><w:rPr>");
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{}" w:hAnsi="{}" w:cs="{}"/>"#,
            font, font, font
        ));
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, size));
        xml.push_str("</w:rPr></w:rPrDefault>");
        xml.push_str("<w:pPrDefault><w:pPr>");
        xml.push_str(r#"<w:spacing w:after="0" w:line="240" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr></w:pPrDefault>");
        xml.push_str("</w:docDefaults>");
    }

    fn write_normal_style(&self, xml: &mut String) {
        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#);
        xml.push_str(r#"<w:name w:val="Normal"/>"#);
        xml.push_str(r#"<w:qFormat/>"#);
        xml.push_str("</w:style>");
    }

    fn write_heading_style(&self, xml: &mut String, level: usize, size: u32) {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{}">"#,
            level
        ));
        xml.push_str(&format!(r#"<w:name w:val="heading {}"/>"#, level));
        xml.push_str(r#"<w:basedOn w:val="Normal"/>"#);
        xml.push_str(r#"<w:next w:val="Normal"/>"#);
        xml.push_str(&format!(r#"<w:uiPriority w:val="{}"/>"#, 9));
        xml.push_str(r#"<w:qFormat/>"#);
        xml.push_str(&format!(
            r#"<w:pPr><w:keepNext/><w:outlineLvl w:val="{}"/></w:pPr>"#,
            level - 1
        ));
        xml.push_str(&format!(
            r#"<w:rPr><w:b/><w:sz w:val="{}"/><w:szCs w:val="{}"/></w:rPr>"#,
            size, size
        ));
        xml.push_str("</w:style>");
    }
}
