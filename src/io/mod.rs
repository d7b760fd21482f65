//! IO module for format-specific reading and writing operations.
//!
//! Each format module handles reading and/or writing for one file format:
//!
//! - `geojson` - district and street layers, styled map layers, reprojection
//! - `csv` - the transport mode-share table
//! - `svg` - static previews of styled maps
//!
//! Only this module touches the filesystem; everything downstream takes
//! already-loaded data.

pub mod csv;
pub mod geojson;
pub(crate) mod svg;
