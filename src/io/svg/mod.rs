//! SVG format writing operations for static map previews.

mod geometry;
mod writer;

pub(crate) use geometry::*;
pub(crate) use writer::*;
