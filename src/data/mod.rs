//! Reference datasets: district boundaries, street segments with scores,
//! and the transport mode-share table. All immutable once loaded.

mod district;
mod modes;
mod street;

pub use district::{District, DistrictLayer};
pub use modes::ModeShare;
pub use street::{StreetLayer, StreetSegment};
