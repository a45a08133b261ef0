//! Block and run model shared by the builder and the document assembler

use serde::{Deserialize, Serialize};
use std::fmt;

/// Font used for inline code, regardless of the configured body font
pub const MONOSPACE_FONT: &str = "Courier New";

/// Heading level, always within 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const TOP: HeadingLevel = HeadingLevel(1);

    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(HeadingLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Level of an `h1`..`h6` tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        let digit = tag.strip_prefix('h')?;
        if digit.len() != 1 {
            return None;
        }
        digit.parse().ok().and_then(HeadingLevel::new)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        HeadingLevel::new(level).ok_or_else(|| format!("heading level {} out of range", level))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A formatted span of text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// Never empty
    pub content: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    /// Font override; the document font applies when absent
    pub font: Option<String>,
    /// Size override in points; the document size applies when absent
    pub size_pt: Option<f64>,
}

impl TextRun {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(content)
        }
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(content)
        }
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self {
            code: true,
            font: Some(MONOSPACE_FONT.to_string()),
            ..Self::plain(content)
        }
    }
}

/// Inline content of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Run {
    Text(TextRun),
    LineBreak,
}

/// Block-level content of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Heading { level: HeadingLevel, runs: Vec<Run> },
    Paragraph { runs: Vec<Run> },
}

impl Block {
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } => runs,
        }
    }

    pub fn into_runs(self) -> Vec<Run> {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } => runs,
        }
    }

    /// Plain text of the block, line breaks as `\n`
    pub fn plain_text(&self) -> String {
        self.runs()
            .iter()
            .map(|run| match run {
                Run::Text(text) => text.content.as_str(),
                Run::LineBreak => "\n",
            })
            .collect()
    }
}
