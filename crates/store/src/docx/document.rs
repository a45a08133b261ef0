//! Structured document model written to document.xml
//!
//! A flat list of styled paragraphs with fully resolved run formatting and
//! a single section whose page setup is expressed in points.

use doc_model::{HalfPoints, HeadingLevel, Orientation, Points};
use serde::{Deserialize, Serialize};

/// Spacing before a heading, in twentieths of a point
pub const HEADING_SPACING_BEFORE: u32 = 240;
/// Spacing after a heading, in twentieths of a point
pub const HEADING_SPACING_AFTER: u32 = 120;
/// Spacing after a body paragraph, in twentieths of a point
pub const BODY_SPACING_AFTER: u32 = 120;

/// Page setup of the single document section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSetup {
    pub page_width: Points,
    pub page_height: Points,
    pub content_width: Points,
    pub content_height: Points,
    pub margin_top: Points,
    pub margin_bottom: Points,
    pub margin_left: Points,
    pub margin_right: Points,
    pub orientation: Orientation,
}

/// Paragraph style reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphStyle {
    Normal,
    Heading(HeadingLevel),
}

impl ParagraphStyle {
    /// Style ID as declared in styles.xml
    pub fn style_id(&self) -> String {
        match self {
            ParagraphStyle::Normal => "Normal".to_string(),
            ParagraphStyle::Heading(level) => format!("Heading{}", level.get()),
        }
    }
}

/// A run with resolved formatting. Newlines in `text` become line breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRun {
    pub text: String,
    pub font: String,
    pub size: HalfPoints,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocParagraph {
    pub style: ParagraphStyle,
    /// Spacing before, in twentieths of a point
    pub spacing_before: Option<u32>,
    /// Spacing after, in twentieths of a point
    pub spacing_after: Option<u32>,
    pub runs: Vec<DocRun>,
}

impl DocParagraph {
    pub fn heading(level: HeadingLevel, runs: Vec<DocRun>) -> Self {
        Self {
            style: ParagraphStyle::Heading(level),
            spacing_before: Some(HEADING_SPACING_BEFORE),
            spacing_after: Some(HEADING_SPACING_AFTER),
            runs,
        }
    }

    pub fn body(runs: Vec<DocRun>) -> Self {
        Self {
            style: ParagraphStyle::Normal,
            spacing_before: None,
            spacing_after: Some(BODY_SPACING_AFTER),
            runs,
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// The document handed to the DOCX packager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    pub section: SectionSetup,
    pub paragraphs: Vec<DocParagraph>,
    /// Default run font
    pub font_family: String,
    /// Default run size
    pub font_size: HalfPoints,
    /// Requested line height. Kept for reference, not applied to spacing.
    pub line_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_ids() {
        assert_eq!(ParagraphStyle::Normal.style_id(), "Normal");
        let h3 = ParagraphStyle::Heading(HeadingLevel::new(3).unwrap());
        assert_eq!(h3.style_id(), "Heading3");
    }

    #[test]
    fn test_paragraph_spacing() {
        let heading = DocParagraph::heading(HeadingLevel::new(1).unwrap(), vec![]);
        assert_eq!(heading.spacing_before, Some(240));
        assert_eq!(heading.spacing_after, Some(120));

        let body = DocParagraph::body(vec![]);
        assert_eq!(body.spacing_before, None);
        assert_eq!(body.spacing_after, Some(120));
    }
}
