//! Document Assembler - Builds the structured document from blocks
//!
//! Page geometry is converted from millimeters to points, every block
//! becomes one styled paragraph and every run is given a concrete font and
//! size from the page setup. Code runs keep the monospace font.

use crate::docx::document::{DocParagraph, DocRun, SectionSetup, StructuredDocument};
use doc_model::{Block, HeadingLevel, PageGeometry, PageSetup, Points, Run, TextRun};

/// Heading of the table of contents placeholder
pub const TOC_TITLE: &str = "Table of Contents";

/// Body of the table of contents placeholder
pub const TOC_NOTE: &str =
    "Update the table of contents in your word processor to list the headings of this document.";

/// Paragraph appended when page numbers are requested
pub const PAGE_NUMBER_NOTE: &str =
    "Page numbers are assigned by your word processor once the document is laid out.";

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, blocks: &[Block], geometry: &PageGeometry, setup: &PageSetup) -> StructuredDocument {
        let formatter = RunFormatter::new(setup);
        let mut paragraphs = Vec::with_capacity(blocks.len() + 3);

        if setup.table_of_contents {
            paragraphs.push(DocParagraph::heading(HeadingLevel::TOP, vec![formatter.plain(TOC_TITLE)]));
            paragraphs.push(DocParagraph::body(vec![formatter.plain(TOC_NOTE)]));
        }

        for block in blocks {
            let runs = block.runs().iter().map(|run| formatter.format(run)).collect();
            paragraphs.push(match block {
                Block::Heading { level, .. } => DocParagraph::heading(*level, runs),
                Block::Paragraph { .. } => DocParagraph::body(runs),
            });
        }

        if setup.page_numbers {
            paragraphs.push(DocParagraph::body(vec![formatter.plain(PAGE_NUMBER_NOTE)]));
        }

        tracing::debug!(
            blocks = blocks.len(),
            paragraphs = paragraphs.len(),
            toc = setup.table_of_contents,
            page_numbers = setup.page_numbers,
            "Assembled structured document"
        );

        StructuredDocument {
            section: section_setup(geometry, setup),
            paragraphs,
            font_family: setup.font_family.clone(),
            font_size: Points(setup.font_size).to_half_points(),
            line_height: setup.line_height,
        }
    }
}

fn section_setup(geometry: &PageGeometry, setup: &PageSetup) -> SectionSetup {
    SectionSetup {
        page_width: geometry.width.to_points(),
        page_height: geometry.height.to_points(),
        content_width: geometry.content_width.to_points(),
        content_height: geometry.content_height.to_points(),
        margin_top: geometry.margins.top.to_points(),
        margin_bottom: geometry.margins.bottom.to_points(),
        margin_left: geometry.margins.left.to_points(),
        margin_right: geometry.margins.right.to_points(),
        orientation: setup.orientation,
    }
}

struct RunFormatter<'a> {
    font_family: &'a str,
    font_size: Points,
}

impl<'a> RunFormatter<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        Self {
            font_family: &setup.font_family,
            font_size: Points(setup.font_size),
        }
    }

    fn format(&self, run: &Run) -> DocRun {
        match run {
            Run::Text(text) => self.text(text),
            Run::LineBreak => self.plain("\n"),
        }
    }

    /// Code runs always use the monospace font; other runs fall back to the page setup font
    fn text(&self, run: &TextRun) -> DocRun {
        let font = if run.code {
            doc_model::MONOSPACE_FONT.to_string()
        } else {
            run.font.clone().unwrap_or_else(|| self.font_family.to_string())
        };
        let size = run.size_pt.map(Points).unwrap_or(self.font_size);
        DocRun {
            text: run.content.clone(),
            font,
            size: size.to_half_points(),
            bold: run.bold,
            italic: run.italic,
        }
    }

    fn plain(&self, text: &str) -> DocRun {
        DocRun {
            text: text.to_string(),
            font: self.font_family.to_string(),
            size: self.font_size.to_half_points(),
            bold: false,
            italic: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::document::ParagraphStyle;
    use doc_model::{HalfPoints, Millimeters, Orientation, PageMargins, PageSizePreset};

    fn setup() -> PageSetup {
        PageSetup::default()
    }

    fn geometry(setup: &PageSetup) -> PageGeometry {
        setup.geometry().unwrap()
    }

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::Heading {
                level: HeadingLevel::new(2).unwrap(),
                runs: vec![Run::Text(TextRun::plain("Title"))],
            },
            Block::Paragraph {
                runs: vec![
                    Run::Text(TextRun::plain("Hello")),
                    Run::Text(TextRun::bold("World")),
                    Run::LineBreak,
                    Run::Text(TextRun::code("let x")),
                ],
            },
        ]
    }

    #[test]
    fn test_page_setup_in_points() {
        let setup = setup();
        let doc = DocumentAssembler::new().assemble(&[], &geometry(&setup), &setup);
        assert!((doc.section.content_width.get() - 4819.5).abs() < 1e-9);
        assert!((doc.section.page_width.get() - 210.0 * 28.35).abs() < 1e-9);
        assert!((doc.section.margin_left.get() - 567.0).abs() < 1e-9);
        assert_eq!(doc.section.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_landscape_section() {
        let setup = PageSetup {
            page_size: PageSizePreset::Letter,
            orientation: Orientation::Landscape,
            margins: PageMargins::new(10.0, 10.0, 15.0, 15.0),
            ..PageSetup::default()
        };
        let geometry = geometry(&setup);
        assert_eq!(geometry.width, Millimeters(279.4));
        let doc = DocumentAssembler::new().assemble(&[], &geometry, &setup);
        assert_eq!(doc.section.orientation, Orientation::Landscape);
        assert!(doc.section.page_width.get() > doc.section.page_height.get());
    }

    #[test]
    fn test_blocks_map_to_paragraphs() {
        let setup = setup();
        let doc = DocumentAssembler::new().assemble(&sample_blocks(), &geometry(&setup), &setup);
        assert_eq!(doc.paragraphs.len(), 2);

        let heading = &doc.paragraphs[0];
        assert_eq!(heading.style, ParagraphStyle::Heading(HeadingLevel::new(2).unwrap()));
        assert_eq!(heading.spacing_before, Some(240));
        assert_eq!(heading.spacing_after, Some(120));

        let body = &doc.paragraphs[1];
        assert_eq!(body.style, ParagraphStyle::Normal);
        assert_eq!(body.spacing_after, Some(120));
        assert_eq!(body.text(), "HelloWorld\nlet x");
    }

    #[test]
    fn test_run_formatting() {
        let setup = PageSetup {
            font_family: "Georgia".to_string(),
            ..PageSetup::default()
        };
        let doc = DocumentAssembler::new().assemble(&sample_blocks(), &geometry(&setup), &setup);
        let runs = &doc.paragraphs[1].runs;

        assert_eq!(runs[0].font, "Georgia");
        assert_eq!(runs[0].size, HalfPoints(24.0));
        assert!(runs[1].bold);
        assert!(!runs[1].italic);
        assert_eq!(runs[2].text, "\n");
        assert_eq!(runs[3].font, "Courier New");
        assert_eq!(runs[3].size, HalfPoints(24.0));
        assert_eq!(doc.font_size, HalfPoints(24.0));
    }

    #[test]
    fn test_placeholders() {
        let setup = PageSetup {
            table_of_contents: true,
            page_numbers: true,
            ..PageSetup::default()
        };
        let doc = DocumentAssembler::new().assemble(&sample_blocks(), &geometry(&setup), &setup);
        assert_eq!(doc.paragraphs.len(), 5);
        assert_eq!(doc.paragraphs[0].text(), TOC_TITLE);
        assert!(matches!(doc.paragraphs[0].style, ParagraphStyle::Heading(level) if level.get() == 1));
        assert_eq!(doc.paragraphs[1].text(), TOC_NOTE);
        assert_eq!(doc.paragraphs[2].text(), "Title");
        assert_eq!(doc.paragraphs[4].text(), PAGE_NUMBER_NOTE);
    }

    #[test]
    fn test_line_height_is_recorded_only() {
        let setup = PageSetup {
            line_height: 2.0,
            ..PageSetup::default()
        };
        let doc = DocumentAssembler::new().assemble(&sample_blocks(), &geometry(&setup), &setup);
        assert_eq!(doc.line_height, 2.0);
        assert_eq!(doc.paragraphs[1].spacing_after, Some(120));
    }
}
