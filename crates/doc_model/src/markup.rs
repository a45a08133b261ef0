//! Markup Tree - The rendered preview as an owned element tree
//!
//! The preview is held as a small DOM-like tree: elements with a tag name,
//! attributes, an inline style map and children, plus text and comment
//! leaves. The style engine writes inline styles on it and the document
//! model builder walks it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag used for the synthetic root that holds a parsed fragment
pub const ROOT_TAG: &str = "div";

/// Inline style properties the export pipeline reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    FontSize,
    FontFamily,
    Color,
    BackgroundColor,
    BorderColor,
}

impl StyleProperty {
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::FontSize => "font-size",
            StyleProperty::FontFamily => "font-family",
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::BorderColor => "border-color",
        }
    }
}

/// Inline `style` declarations of one element, keyed by CSS property name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyle {
    declarations: BTreeMap<String, String>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value (`name: value; name: value`)
    pub fn parse(css: &str) -> Self {
        let mut style = Self::new();
        for declaration in css.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim();
                if !name.is_empty() && !value.is_empty() {
                    style.declarations.insert(name, value.to_string());
                }
            }
        }
        style
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.declarations.get(property.css_name()).map(String::as_str)
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        self.declarations.insert(property.css_name().to_string(), value.into());
    }

    /// Set or remove a property depending on whether a value is given
    pub fn restore(&mut self, property: StyleProperty, value: Option<String>) {
        match value {
            Some(value) => self.set(property, value),
            None => self.remove(property),
        }
    }

    pub fn remove(&mut self, property: StyleProperty) {
        self.declarations.remove(property.css_name());
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to a `style` attribute value
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// An element of the markup tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes other than `style`, in source order
    pub attributes: Vec<(String, String)>,
    pub style: InlineStyle,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            style: InlineStyle::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            child.collect_text(&mut text);
        }
        text
    }

    /// Apply `f` to every descendant element in document order, excluding self
    pub fn for_each_descendant_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let MarkupNode::Element(element) = child {
                f(element);
                element.for_each_descendant_mut(f);
            }
        }
    }

    /// Apply `f` to every descendant element whose tag is in `tags`
    pub fn for_each_tagged_mut(&mut self, tags: &[&str], f: &mut impl FnMut(&mut Element)) {
        self.for_each_descendant_mut(&mut |element| {
            if tags.contains(&element.tag.as_str()) {
                f(element);
            }
        });
    }
}

/// A node of the markup tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
    Comment(String),
}

impl MarkupNode {
    pub fn element(tag: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Element(Element::new(tag).with_children(children))
    }

    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            MarkupNode::Comment(_) => {}
        }
    }

    /// Serialize the subtree to HTML
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(&quick_xml::escape::escape(text.as_str())),
            MarkupNode::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            MarkupNode::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    out.push_str(&format!(
                        r#" {}="{}""#,
                        name,
                        quick_xml::escape::escape(value.as_str())
                    ));
                }
                if !element.style.is_empty() {
                    out.push_str(&format!(
                        r#" style="{}""#,
                        quick_xml::escape::escape(element.style.to_css().as_str())
                    ));
                }
                if crate::html::is_void_element(&element.tag) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}
