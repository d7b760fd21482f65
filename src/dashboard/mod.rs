//! Dashboard page logic: given a selection of controls, produce styled map
//! layers, street profiles and transport charts from the loaded datasets.
//!
//! Every operation is a pure function of the immutable [`Dashboard`] and the
//! selection; nothing is cached between calls.

mod map;
mod street;
mod transport;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use geo::Point;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::data::{District, DistrictLayer, ModeShare, StreetLayer, StreetSegment};
use crate::geom::{segments_in, Crs, Reprojector};
use crate::io;
use crate::score::{Scenario, ScoreField, SubIndex};
use crate::theme::{resolve_color, ColorTheme};

pub use map::{
    LegendEntry, MapView, PopupRow, StyledMap, StyledSegment,
    DEFAULT_ZOOM, DISTRICT_FILL_OPACITY, DISTRICT_WEIGHT, STREET_OPACITY, STREET_WEIGHT,
};
pub use street::{RadarAxis, RadarChart, ScenarioScore, StreetLookup, StreetProfile, SubIndexScore, NOT_FOUND_NOTICE, RADAR_RANGE};
pub use transport::{PieChart, PieSlice, TransportSummary, PIE_HOLE};

/// The loaded reference data of one session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    districts: DistrictLayer,
    streets: StreetLayer,
    modes: Option<ModeShare>,
    on_foot_label: String,
    street_id_field: String,
}

impl Dashboard {
    /// Assemble a dashboard from loaded layers. The street layer is reprojected
    /// into the district layer's CRS when the two differ.
    pub fn new(districts: DistrictLayer, streets: StreetLayer, modes: Option<ModeShare>) -> Result<Self> {
        let streets = if streets.crs() != districts.crs() {
            info!(from = %streets.crs(), to = %districts.crs(), "[dashboard] reprojecting streets to district CRS");
            streets.reproject(districts.crs())?
        } else {
            streets
        };

        let defaults = DashboardConfig::default();
        Ok(Self {
            districts,
            streets,
            modes,
            on_foot_label: defaults.on_foot_label,
            street_id_field: defaults.street_id_field,
        })
    }

    /// Row label of the mode-share table counted as walking.
    pub fn with_on_foot_label(mut self, label: impl Into<String>) -> Self {
        self.on_foot_label = label.into();
        self
    }

    /// Attribute name the street id is exported under, matching the input layer.
    pub fn with_street_id_field(mut self, field: impl Into<String>) -> Self {
        self.street_id_field = field.into();
        self
    }

    /// Load every input named by a config. A missing mode-share file only disables the transport view.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let mut districts = io::geojson::read_districts(&config.districts, &config.district_name_field)?;
        let mut streets = io::geojson::read_streets(&config.streets, &config.street_id_field, &config.street_district_field)?;

        if let Some(epsg) = config.target_epsg {
            let target = Crs::from_epsg(epsg).context("[dashboard] invalid target_epsg")?;
            districts = districts.reproject(target)?;
            streets = streets.reproject(target)?;
        }

        let modes = if config.transport.is_file() {
            Some(io::csv::read_mode_share(&config.transport, &config.mode_column)?)
        } else {
            warn!(path = %config.transport.display(), "[dashboard] no mode-share table, transport view disabled");
            None
        };

        Ok(Self::new(districts, streets, modes)?
            .with_on_foot_label(config.on_foot_label.clone())
            .with_street_id_field(config.street_id_field.clone()))
    }

    /// Load from a data directory (see [`DashboardConfig::load`]).
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::from_config(&DashboardConfig::load(data_dir)?)
    }

    #[inline] pub fn districts(&self) -> &DistrictLayer { &self.districts }

    #[inline] pub fn streets(&self) -> &StreetLayer { &self.streets }

    #[inline] pub fn mode_share(&self) -> Option<&ModeShare> { self.modes.as_ref() }

    /// District selector options, in dataset order.
    pub fn district_names(&self) -> Vec<&str> { self.districts.names() }

    /// Look up a district; unknown names are an error since the selector only offers known ones.
    pub fn district(&self, name: &str) -> Result<&District> {
        self.districts.get(name)
            .ok_or_else(|| anyhow!("[dashboard] unknown district {name:?}"))
    }

    /// Streets intersecting a district.
    pub fn streets_in(&self, district: &str) -> Result<Vec<&StreetSegment>> {
        segments_in(self.district(district)?, &self.streets)
    }

    /// Composite walkability map of a district under a scenario.
    pub fn walkability_map(&self, district: &str, scenario: Scenario, theme: ColorTheme) -> Result<StyledMap> {
        let field = scenario.walkability_field();
        self.styled_map(district, field, theme, |street, score, category| {
            let popup = vec![
                PopupRow::new("Street ID", street.id()),
                PopupRow::new("Scenario", scenario.label()),
                PopupRow::new("Walkability Score", score.to_string()).highlighted(true),
                PopupRow::new("Category", category.label()),
            ];
            (format!("Score: {score} | {category}"), popup)
        }, format!("Walkability Index | {district} | {scenario}"))
    }

    /// Map of one sub-index in a district, classified with the sub-index thresholds.
    pub fn sub_index_map(&self, district: &str, sub_index: SubIndex, theme: ColorTheme) -> Result<StyledMap> {
        let field = sub_index.field();
        self.styled_map(district, field, theme, |street, score, category| {
            let mut popup = vec![PopupRow::new("Street ID", street.id())];
            popup.extend(SubIndex::ALL.iter().map(|&other| {
                PopupRow::new(other.column(), street.field_score(other.field()).to_string())
                    .highlighted(other == sub_index)
            }));
            (format!("{}: {score} | {category}", sub_index.column()), popup)
        }, format!("Walkability Index | Sub-Indexes | {district} | {}", sub_index.column()))
    }

    fn styled_map<F>(&self, district: &str, field: ScoreField, theme: ColorTheme, describe: F, title: String) -> Result<StyledMap>
    where
        F: Fn(&StreetSegment, f64, crate::score::ScoreCategory) -> (String, Vec<PopupRow>),
    {
        let selected = self.district(district)?;
        let thresholds = field.scale().thresholds();

        let segments: Vec<StyledSegment> = segments_in(selected, &self.streets)?
            .into_iter()
            .map(|street| {
                let score = street.field_score(field);
                let category = thresholds.classify(score);
                let (tooltip, popup) = describe(street, score, category);
                StyledSegment {
                    id: street.id().to_string(),
                    score,
                    category,
                    color: resolve_color(category, theme),
                    tooltip,
                    popup,
                    shape: street.shape().clone(),
                }
            })
            .collect();

        let legend = thresholds.bands().into_iter()
            .map(|band| LegendEntry::from_band(band, resolve_color(band.category, theme)))
            .collect();

        info!(district, field = field.column(), theme = %theme, segments = segments.len(), "[dashboard] styled map");

        Ok(StyledMap {
            title,
            district: selected.name().to_string(),
            theme,
            field: field.column().to_string(),
            id_field: self.street_id_field.clone(),
            crs: self.districts.crs(),
            view: self.map_view(selected)?,
            legend,
            segments,
            districts: self.districts.iter().map(|d| (d.name().to_string(), d.shape().clone())).collect(),
        })
    }

    /// Map view centered on the district centroid, in lon/lat.
    fn map_view(&self, district: &District) -> Result<Option<MapView>> {
        let Some(centroid) = district.centroid() else { return Ok(None) };
        let Point(center) = centroid;
        let center = Reprojector::new(district.crs(), Crs::WGS84)?.coord(center)?;
        Ok(Some(MapView { center: [center.x, center.y], zoom: DEFAULT_ZOOM }))
    }

    /// Look up a street by id. Unknown or blank ids yield `NotFound`, never an error.
    pub fn street(&self, id: &str) -> StreetLookup {
        let id = id.trim();
        match self.streets.get(id) {
            Some(street) => StreetLookup::Found(Box::new(StreetProfile::new(street))),
            None => {
                debug!(street = id, "[dashboard] street id not found");
                StreetLookup::NotFound { id: id.to_string() }
            }
        }
    }

    /// Mode-share pie chart of a district (a column of the mode-share table).
    pub fn transport(&self, district: &str) -> Result<TransportSummary> {
        let table = self.modes.as_ref()
            .ok_or_else(|| anyhow!("[dashboard] no mode-share table loaded"))?;
        TransportSummary::new(table, district, &self.on_foot_label)
            .ok_or_else(|| anyhow!("[dashboard] district {district:?} is not in the mode-share table"))
    }
}
