//! Layout Engine - Pagination of rendered raster images
//!
//! This crate lays a rasterized preview out over fixed-size pages for the
//! paginated export target.

mod paginator;
mod error;

pub use paginator::*;
pub use error::*;
