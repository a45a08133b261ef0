//! Document Model Builder - Converts the rendered markup tree into blocks and runs
//!
//! Every node is classified into a closed set of kinds and each kind has
//! exactly one conversion rule. Tags without a rule are transparent: their
//! children are spliced into the parent in place.

use crate::markup::{Element, MarkupNode};
use crate::model::{Block, HeadingLevel, Run, TextRun};

/// What a single node contributes to the model
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutput {
    Block(Block),
    Run(Run),
    /// Results of a transparent element's children, in order
    Sequence(Vec<BuildOutput>),
}

/// Node classification driving [`DocumentModelBuilder::build`]
enum NodeKind<'a> {
    Text(&'a str),
    Heading(HeadingLevel, &'a Element),
    Paragraph(&'a Element),
    Bold(&'a Element),
    Italic(&'a Element),
    Code(&'a Element),
    LineBreak,
    Transparent(&'a Element),
    Ignored,
}

impl<'a> NodeKind<'a> {
    fn classify(node: &'a MarkupNode) -> Self {
        let element = match node {
            MarkupNode::Text(text) => return NodeKind::Text(text),
            MarkupNode::Comment(_) => return NodeKind::Ignored,
            MarkupNode::Element(element) => element,
        };

        if let Some(level) = HeadingLevel::from_tag(&element.tag) {
            return NodeKind::Heading(level, element);
        }

        match element.tag.as_str() {
            "p" => NodeKind::Paragraph(element),
            "strong" | "b" => NodeKind::Bold(element),
            "em" | "i" => NodeKind::Italic(element),
            "code" => NodeKind::Code(element),
            "br" => NodeKind::LineBreak,
            _ => NodeKind::Transparent(element),
        }
    }
}

/// Builds the block/run document model from a markup tree
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentModelBuilder;

impl DocumentModelBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Convert one node. `None` means the node contributes nothing.
    pub fn build(&self, node: &MarkupNode) -> Option<BuildOutput> {
        match NodeKind::classify(node) {
            NodeKind::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| BuildOutput::Run(Run::Text(TextRun::plain(trimmed))))
            }
            NodeKind::Heading(level, element) => Some(BuildOutput::Block(Block::Heading {
                level,
                runs: self.children_as_runs(element),
            })),
            NodeKind::Paragraph(element) => Some(BuildOutput::Block(Block::Paragraph {
                runs: self.children_as_runs(element),
            })),
            NodeKind::Bold(element) => inline_run(element, TextRun::bold),
            NodeKind::Italic(element) => inline_run(element, TextRun::italic),
            NodeKind::Code(element) => inline_run(element, TextRun::code),
            NodeKind::LineBreak => Some(BuildOutput::Run(Run::LineBreak)),
            NodeKind::Transparent(element) => {
                let outputs: Vec<BuildOutput> = element
                    .children
                    .iter()
                    .filter_map(|child| self.build(child))
                    .collect();
                (!outputs.is_empty()).then_some(BuildOutput::Sequence(outputs))
            }
            NodeKind::Ignored => None,
        }
    }

    /// Build the ordered block sequence for the direct children of `root`.
    ///
    /// Runs that surface outside any block are gathered into a paragraph per
    /// consecutive sequence. A container child never shares a paragraph
    /// with its siblings.
    pub fn build_document(&self, root: &MarkupNode) -> Vec<Block> {
        let mut collector = BlockCollector::default();
        match root {
            MarkupNode::Element(element) => {
                for child in &element.children {
                    match self.build(child) {
                        Some(output @ BuildOutput::Sequence(_)) => {
                            collector.flush();
                            collector.push(output);
                            collector.flush();
                        }
                        Some(output) => collector.push(output),
                        None => {}
                    }
                }
            }
            other => {
                if let Some(output) = self.build(other) {
                    collector.push(output);
                }
            }
        }
        collector.finish()
    }

    fn children_as_runs(&self, element: &Element) -> Vec<Run> {
        let mut runs = Vec::new();
        for child in &element.children {
            if let Some(output) = self.build(child) {
                flatten_runs(output, &mut runs);
            }
        }
        runs
    }
}

fn inline_run(element: &Element, make: fn(String) -> TextRun) -> Option<BuildOutput> {
    let content = element.text_content();
    (!content.is_empty()).then(|| BuildOutput::Run(Run::Text(make(content))))
}

fn flatten_runs(output: BuildOutput, runs: &mut Vec<Run>) {
    match output {
        BuildOutput::Run(run) => runs.push(run),
        BuildOutput::Block(block) => runs.extend(block.into_runs()),
        BuildOutput::Sequence(outputs) => {
            for output in outputs {
                flatten_runs(output, runs);
            }
        }
    }
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Block>,
    loose: Vec<Run>,
}

impl BlockCollector {
    fn push(&mut self, output: BuildOutput) {
        match output {
            BuildOutput::Block(block) => {
                self.flush();
                self.blocks.push(block);
            }
            BuildOutput::Run(run) => self.loose.push(run),
            BuildOutput::Sequence(outputs) => {
                for output in outputs {
                    self.push(output);
                }
            }
        }
    }

    fn flush(&mut self) {
        if !self.loose.is_empty() {
            let runs = std::mem::take(&mut self.loose);
            self.blocks.push(Block::Paragraph { runs });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}
