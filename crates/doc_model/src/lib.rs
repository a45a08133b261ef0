//! Document Model - Markup tree, visual settings and the block/run model
//!
//! This crate holds everything the export pipeline knows about a document
//! before it becomes an artifact: the rendered preview as a markup tree, the
//! settings and presets that restyle it, per-target page setup with its
//! resolved geometry, and the block/run model built from the tree.

mod error;
pub mod units;
pub mod markup;
pub mod html;
pub mod model;
pub mod builder;
pub mod section;
pub mod theme;
pub mod style;

pub use error::*;
pub use units::*;
pub use markup::*;
pub use html::{is_void_element, parse_fragment};
pub use model::*;
pub use builder::*;
pub use section::*;
pub use theme::*;
pub use style::*;
