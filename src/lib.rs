#![doc = "Walkability dashboard public API"]
mod config;
mod dashboard;
mod data;
mod geom;
mod io;
mod score;
mod theme;

#[doc(inline)]
pub use config::DashboardConfig;

#[doc(inline)]
pub use dashboard::{
    Dashboard, LegendEntry, MapView, PieChart, PieSlice, PopupRow, RadarAxis, RadarChart,
    ScenarioScore, StreetLookup, StreetProfile, StyledMap, StyledSegment, SubIndexScore,
    TransportSummary, DEFAULT_ZOOM, DISTRICT_FILL_OPACITY, DISTRICT_WEIGHT, NOT_FOUND_NOTICE,
    PIE_HOLE, RADAR_RANGE, STREET_OPACITY, STREET_WEIGHT,
};

#[doc(inline)]
pub use data::{District, DistrictLayer, ModeShare, StreetLayer, StreetSegment};

#[doc(inline)]
pub use geom::{segments_in, Crs, Reprojector};

#[doc(inline)]
pub use io::csv::{read_mode_share, read_mode_share_str};

#[doc(inline)]
pub use io::geojson::{
    read_districts, read_districts_bytes, read_streets, read_streets_bytes,
    reproject_file, reproject_geojson_bytes, write_json,
};

#[doc(inline)]
pub use score::{
    classify_composite, classify_subindex, Band, Scale, Scenario, ScoreCategory, ScoreField,
    SubIndex, Thresholds, COMPOSITE, SUB_INDEX,
};

#[doc(inline)]
pub use theme::{resolve_color, resolve_color_by_name, ColorTheme, Rgb, FALLBACK_GRAY, INFERNO};
