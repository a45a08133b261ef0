//! Export - Markdown preview export pipeline
//!
//! Turns the rendered preview and its source text into PNG, PDF and DOCX
//! artifacts. Rasterization and markdown rendering are collaborators behind
//! the [`Rasterizer`] and [`MarkdownRenderer`] traits.

mod error;
mod rasterizer;
mod render;
mod session;
mod artifact;
mod pipeline;

pub use error::*;
pub use rasterizer::*;
pub use render::*;
pub use session::*;
pub use artifact::*;
pub use pipeline::*;
