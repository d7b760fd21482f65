//! GeoJSON format: FeatureCollections with an optional legacy `crs` member.

mod read;
mod write;

pub use read::{read_districts, read_districts_bytes, read_streets, read_streets_bytes};
pub(crate) use write::{feature_collection, multilinestring_to_geojson, multipolygon_to_geojson};
pub use write::{reproject_file, reproject_geojson_bytes, write_json};
