//! Style Engine - Applies visual settings to the preview tree as inline styles
//!
//! `apply` writes inline styles onto the root and selected descendants and
//! returns a snapshot of the root's previous values; `revert` puts the root
//! back and clears the styled properties everywhere below it. Exports use
//! [`StyleEngine::styled_copy`] so the live preview is never touched.

use crate::markup::{Element, MarkupNode, StyleProperty};
use crate::model::HeadingLevel;
use crate::theme::Settings;

/// The four root properties touched by [`StyleEngine::apply`]
const ROOT_PROPERTIES: [StyleProperty; 4] = [
    StyleProperty::FontSize,
    StyleProperty::FontFamily,
    StyleProperty::Color,
    StyleProperty::BackgroundColor,
];

/// Root inline style values captured before styling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub font_size: Option<String>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl StyleSnapshot {
    fn capture(root: &Element) -> Self {
        let get = |property| root.style.get(property).map(str::to_string);
        Self {
            font_size: get(StyleProperty::FontSize),
            font_family: get(StyleProperty::FontFamily),
            color: get(StyleProperty::Color),
            background_color: get(StyleProperty::BackgroundColor),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StyleEngine;

impl StyleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Style `root` and its descendants in place
    pub fn apply(&self, root: &mut Element, settings: &Settings) -> StyleSnapshot {
        let snapshot = StyleSnapshot::capture(root);

        root.style.set(StyleProperty::FontSize, px(settings.body_size));
        root.style.set(StyleProperty::FontFamily, settings.body_font.as_str());
        root.style.set(StyleProperty::Color, settings.body_color.as_str());
        root.style.set(StyleProperty::BackgroundColor, settings.background1.as_str());

        root.for_each_descendant_mut(&mut |element| {
            if let Some(level) = HeadingLevel::from_tag(&element.tag) {
                let scale = settings.heading_scale(level.get());
                element.style.set(StyleProperty::FontSize, format!("{}em", scale));
                element.style.set(StyleProperty::FontFamily, settings.heading_font.as_str());
                element.style.set(StyleProperty::Color, settings.heading_color.as_str());
            }
        });

        root.for_each_tagged_mut(&["code", "pre"], &mut |element| {
            element.style.set(StyleProperty::FontSize, px(settings.code_size));
            element.style.set(StyleProperty::FontFamily, settings.code_font.as_str());
            element.style.set(StyleProperty::BackgroundColor, settings.code_bg.as_str());
            element.style.set(StyleProperty::Color, settings.code_text.as_str());
        });

        root.for_each_tagged_mut(&["table"], &mut |table| {
            table.style.set(StyleProperty::FontSize, px(settings.table_size));
            table.style.set(StyleProperty::BorderColor, settings.border_color.as_str());

            table.for_each_tagged_mut(&["th"], &mut |header| {
                header.style.set(StyleProperty::BackgroundColor, settings.header_bg.as_str());
                header.style.set(StyleProperty::Color, settings.header_text.as_str());
            });
            table.for_each_tagged_mut(&["td"], &mut |cell| {
                cell.style.set(StyleProperty::BackgroundColor, settings.cell_bg.as_str());
                cell.style.set(StyleProperty::Color, settings.cell_text.as_str());
            });
        });

        snapshot
    }

    /// Undo [`StyleEngine::apply`]: restore the root and clear every descendant.
    ///
    /// Descendant values that existed before `apply` are not brought back.
    pub fn revert(&self, root: &mut Element, snapshot: StyleSnapshot) {
        root.style.restore(StyleProperty::FontSize, snapshot.font_size);
        root.style.restore(StyleProperty::FontFamily, snapshot.font_family);
        root.style.restore(StyleProperty::Color, snapshot.color);
        root.style.restore(StyleProperty::BackgroundColor, snapshot.background_color);

        root.for_each_descendant_mut(&mut |element| {
            for property in ROOT_PROPERTIES {
                element.style.remove(property);
            }
        });
    }

    /// Settings after selecting the named preset. Unknown names change nothing.
    pub fn apply_preset(&self, current: Settings, name: &str) -> Settings {
        match Settings::preset(name) {
            Some(settings) => {
                tracing::debug!(preset = name, "Applying theme preset");
                settings
            }
            None => {
                tracing::debug!(preset = name, "Ignoring unknown theme preset");
                current
            }
        }
    }

    /// A styled copy of `tree`, leaving the original untouched
    pub fn styled_copy(&self, tree: &MarkupNode, settings: &Settings) -> MarkupNode {
        let mut copy = tree.clone();
        if let MarkupNode::Element(root) = &mut copy {
            self.apply(root, settings);
        }
        copy
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}
