//! Geometry support: coordinate reference systems, reprojection, and the
//! district/street spatial filter.

mod bbox;
mod filter;
mod proj;

pub(crate) use bbox::{envelope_of, merge_rects, BoundingBox};
pub use filter::segments_in;
pub use proj::{Crs, Reprojector};
