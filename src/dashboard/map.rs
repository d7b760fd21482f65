use std::{io::Write, path::Path};

use anyhow::{anyhow, Result};
use geo::{MultiLineString, MultiPolygon, Rect};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::geom::{merge_rects, Crs};
use crate::io::geojson::{feature_collection, multilinestring_to_geojson, multipolygon_to_geojson};
use crate::io::svg::{self, SvgStringWriter, SvgWriter};
use crate::score::{Band, ScoreCategory};
use crate::theme::{ColorTheme, Rgb};

/// Stroke weight for street lines.
pub const STREET_WEIGHT: f64 = 2.0;
/// Stroke opacity for street lines.
pub const STREET_OPACITY: f64 = 0.9;
/// Stroke weight for district outlines.
pub const DISTRICT_WEIGHT: f64 = 0.5;
/// Fill opacity for district outlines.
pub const DISTRICT_FILL_OPACITY: f64 = 0.1;
/// Initial zoom level of the map view.
pub const DEFAULT_ZOOM: u8 = 14;

/// One labeled value in a street's popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupRow {
    pub label: String,
    pub value: String,
    /// Marks the score the map is colored by.
    pub highlighted: bool,
}

impl PopupRow {
    pub(crate) fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into(), highlighted: false }
    }

    pub(crate) fn highlighted(mut self, on: bool) -> Self {
        self.highlighted = on;
        self
    }
}

/// A street segment classified and colored for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledSegment {
    pub id: String,
    pub score: f64,
    pub category: ScoreCategory,
    pub color: Rgb,
    pub tooltip: String,
    pub popup: Vec<PopupRow>,
    #[serde(skip)]
    pub shape: MultiLineString<f64>,
}

/// A legend row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: ScoreCategory,
    pub color: Rgb,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl LegendEntry {
    pub(crate) fn from_band(band: Band, color: Rgb) -> Self {
        Self { category: band.category, color, min: band.min, max: band.max }
    }

    /// Human-readable score range, e.g. "29 – 42" or "≥ 42".
    pub fn range_label(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{min} – {max}"),
            (Some(min), None) => format!("≥ {min}"),
            (None, Some(max)) => format!("< {max}"),
            (None, None) => "all".to_string(),
        }
    }
}

/// Where the map opens: lon/lat center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
}

/// A fully styled map for one district: outlines of every district plus the
/// selected district's streets, each with color, tooltip and popup.
#[derive(Debug, Clone, Serialize)]
pub struct StyledMap {
    pub title: String,
    pub district: String,
    pub theme: ColorTheme,
    /// Score column the streets are colored by
    pub field: String,
    /// Attribute the street id is exported under
    #[serde(skip)]
    pub id_field: String,
    #[serde(skip)]
    pub crs: Crs,
    pub view: Option<MapView>,
    pub legend: Vec<LegendEntry>,
    pub segments: Vec<StyledSegment>,
    #[serde(skip)]
    pub districts: Vec<(String, MultiPolygon<f64>)>,
}

impl StyledMap {
    /// Number of segments per category, best first.
    pub fn category_counts(&self) -> [(ScoreCategory, usize); 5] {
        ScoreCategory::ALL.map(|category| {
            (category, self.segments.iter().filter(|s| s.category == category).count())
        })
    }

    /// Export as a GeoJSON FeatureCollection: district outlines first, then streets.
    /// Style hints are carried as feature properties.
    pub fn to_geojson(&self) -> Value {
        let outlines = self.districts.iter().map(|(name, shape)| json!({
            "type": "Feature",
            "geometry": multipolygon_to_geojson(shape),
            "properties": {
                "layer": "districts",
                "name": name,
                "selected": *name == self.district,
                "stroke": "gray",
                "stroke-width": DISTRICT_WEIGHT,
                "fill-opacity": DISTRICT_FILL_OPACITY,
            },
        }));

        let streets = self.segments.iter().map(|segment| {
            let mut properties = Map::new();
            properties.insert("layer".to_string(), json!("streets"));
            properties.insert(self.id_field.clone(), json!(segment.id));
            properties.insert("score".to_string(), json!(segment.score));
            properties.insert("category".to_string(), json!(segment.category));
            properties.insert("stroke".to_string(), json!(segment.color));
            properties.insert("stroke-width".to_string(), json!(STREET_WEIGHT));
            properties.insert("stroke-opacity".to_string(), json!(STREET_OPACITY));
            properties.insert("tooltip".to_string(), json!(segment.tooltip));
            properties.insert("popup".to_string(), json!(segment.popup));
            json!({
                "type": "Feature",
                "id": segment.id,
                "geometry": multilinestring_to_geojson(&segment.shape),
                "properties": properties,
            })
        });

        let mut collection = feature_collection(self.crs, outlines.chain(streets).collect());
        collection["properties"] = json!({
            "title": self.title,
            "district": self.district,
            "theme": self.theme,
            "field": self.field,
            "view": self.view,
            "legend": self.legend,
        });
        collection
    }

    /// Bounds of the selected district's streets, or of all outlines if there are none.
    fn bounds(&self) -> Option<Rect<f64>> {
        use geo::BoundingRect;

        let streets = self.segments.iter()
            .filter_map(|s| s.shape.bounding_rect())
            .reduce(merge_rects);
        let selected = self.districts.iter()
            .filter(|(name, _)| *name == self.district)
            .filter_map(|(_, shape)| shape.bounding_rect())
            .reduce(merge_rects);

        match (streets, selected) {
            (Some(a), Some(b)) => Some(merge_rects(a, b)),
            (a, b) => a.or(b).or_else(|| {
                self.districts.iter().filter_map(|(_, shape)| shape.bounding_rect()).reduce(merge_rects)
            }),
        }
    }

    /// Small wrapper with defaults.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        self.to_svg_with_size(path, 1200, 10)
    }

    /// Write a static SVG preview framed on the selected district.
    pub fn to_svg_with_size(&self, path: &Path, width: i32, margin: i32) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        self.write_svg(&mut writer, width, margin)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the SVG preview to a string.
    pub fn to_svg_string(&self, width: i32, margin: i32) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        self.write_svg(&mut writer, width, margin)?;
        writer.into_string()
    }

    fn write_svg(&self, writer: &mut impl Write, width: i32, margin: i32) -> Result<()> {
        let bounds = self.bounds()
            .ok_or_else(|| anyhow!("[dashboard::map] Could not determine bounds; nothing to draw."))?;
        let (project, height) = svg::fit_to_width(bounds, width as f64, margin as f64);

        svg::write_svg_header(writer, width as f64, height, &bounds)?;
        svg::write_svg_styles(writer)?;

        let outlines = self.districts.iter()
            .map(|(name, shape)| (name.as_str(), shape))
            .collect::<Vec<_>>();
        svg::draw_districts(writer, &outlines, Some(self.district.as_str()), &project)?;

        for segment in &self.segments {
            svg::draw_street(writer, &segment.shape, &segment.color.hex(), &segment.tooltip, &project)?;
        }

        for (row, entry) in self.legend.iter().enumerate() {
            let y = margin as f64 + 16.0 * row as f64;
            writeln!(writer, r#"<g class="legend"><rect x="{x}" y="{y:.0}" width="12" height="12" fill="{color}"/><text x="{tx}" y="{ty:.0}">{label} ({range})</text></g>"#,
                x = margin,
                color = entry.color,
                tx = margin + 18,
                ty = y + 10.0,
                label = entry.category,
                range = svg::escape_xml(&entry.range_label()),
            )?;
        }

        svg::write_svg_footer(writer)
    }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, polygon};

    use super::*;
    use crate::score::COMPOSITE;
    use crate::theme::resolve_color;

    fn map() -> StyledMap {
        let segment = |id: &str, score: f64, category| StyledSegment {
            id: id.to_string(),
            score,
            category,
            color: resolve_color(category, ColorTheme::Viridis),
            tooltip: format!("Score: {score} | {category}"),
            popup: vec![PopupRow::new("Street ID", id)],
            shape: MultiLineString(vec![line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 2.0)]]),
        };
        StyledMap {
            title: "Walkability Index | Mitte".to_string(),
            district: "Mitte".to_string(),
            theme: ColorTheme::Viridis,
            field: "Walkability Score - August".to_string(),
            id_field: "Unique_ID".to_string(),
            crs: Crs::WGS84,
            view: None,
            legend: COMPOSITE.bands().into_iter()
                .map(|band| LegendEntry::from_band(band, resolve_color(band.category, ColorTheme::Viridis)))
                .collect(),
            segments: vec![
                segment("a", 50.0, ScoreCategory::Excellent),
                segment("b", 45.0, ScoreCategory::Excellent),
                segment("c", 3.0, ScoreCategory::VeryPoor),
            ],
            districts: vec![(
                "Mitte".to_string(),
                MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)]]),
            )],
        }
    }

    #[test]
    fn legend_ranges_read_naturally() {
        let map = map();
        assert_eq!(map.legend[0].range_label(), "≥ 42");
        assert_eq!(map.legend[1].range_label(), "29 – 42");
        assert_eq!(map.legend[4].range_label(), "< 14");
    }

    #[test]
    fn counts_cover_every_category() {
        let counts = map().category_counts();
        assert_eq!(counts[0], (ScoreCategory::Excellent, 2));
        assert_eq!(counts[2], (ScoreCategory::Moderate, 0));
        assert_eq!(counts[4], (ScoreCategory::VeryPoor, 1));
    }

    #[test]
    fn wgs84_export_has_no_crs_member() {
        let geojson = map().to_geojson();
        assert!(geojson.get("crs").is_none());
        assert_eq!(geojson["features"][1]["properties"]["tooltip"], "Score: 50 | Excellent");
        assert_eq!(geojson["features"][1]["properties"]["Unique_ID"], "a");
        assert!(geojson["features"][1]["properties"].get("id").is_none());
        assert_eq!(geojson["properties"]["legend"][4]["category"], "Very Poor");
    }

    #[test]
    fn svg_preview_draws_every_street() {
        let svg = map().to_svg_string(400, 10).unwrap();
        assert_eq!(svg.matches("class=\"street\"").count(), 3);
        assert!(svg.contains("Very Poor"));
    }
}
