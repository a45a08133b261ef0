//! Markdown rendering
//!
//! Source text becomes sanitized HTML before any export sees it. Raw HTML
//! in the source is dropped rather than passed through.

use doc_model::{parse_fragment, MarkupNode};
use pulldown_cmark::{html, Event, Options, Parser};

/// Renders markdown source to sanitized HTML
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;

    /// Render and parse into a markup tree
    fn render_tree(&self, source: &str) -> doc_model::Result<MarkupNode> {
        parse_fragment(&self.render(source))
    }
}

/// CommonMark renderer with tables and strikethrough
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkRenderer;

impl CmarkRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, Self::options())
            .filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)));
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }
}
