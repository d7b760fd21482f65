//! GeoJSON reading operations.

use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::data::{DistrictLayer, StreetLayer, StreetSegment};
use crate::geom::Crs;

/// A parsed feature: geometry (if not null), properties, and the optional top-level id.
pub(crate) struct RawFeature {
    pub(crate) geometry: Option<Geometry<f64>>,
    pub(crate) properties: Map<String, Value>,
    pub(crate) id: Option<Value>,
}

/// A parsed FeatureCollection and the CRS it declares.
pub(crate) struct RawCollection {
    pub(crate) crs: Crs,
    pub(crate) features: Vec<RawFeature>,
}

/// Read file contents, tagging failures with the path.
fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("[io::geojson::read] Failed to open {}", path.display()))
}

/// Parse the CRS declared by a FeatureCollection's legacy `crs` member (RFC 7946 default otherwise).
pub(crate) fn parse_crs(collection: &Value) -> Result<Crs> {
    match collection["crs"]["properties"]["name"].as_str() {
        Some(name) => Crs::parse(name),
        None => Ok(Crs::WGS84),
    }
}

/// Parse GeoJSON bytes holding a FeatureCollection.
pub(crate) fn parse_feature_collection(bytes: &[u8]) -> Result<RawCollection> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson::read] Failed to parse GeoJSON bytes")?;
    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[io::geojson::read] expected a FeatureCollection, found {}", value["type"]);
    }

    let crs = parse_crs(&value)?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson::read] FeatureCollection has no features array"))?
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let geometry = parse_geometry(&feature["geometry"])
                .with_context(|| format!("[io::geojson::read] invalid geometry in feature {i}"))?;
            let properties = feature["properties"].as_object().cloned().unwrap_or_default();
            let id = feature.get("id").cloned();
            Ok(RawFeature { geometry, properties, id })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RawCollection { crs, features })
}

/// Render an attribute as text: strings verbatim, numbers and booleans via their JSON form.
pub(crate) fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("[io::geojson::read] {what} must be an array, found {value}"))
}

fn parse_coord(value: &Value) -> Result<Coord<f64>> {
    let position = array(value, "position")?;
    let axis = |i: usize| -> Result<f64> {
        position.get(i)
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("[io::geojson::read] invalid position {value}"))
    };
    Ok(Coord { x: axis(0)?, y: axis(1)? })
}

fn parse_line(value: &Value) -> Result<LineString<f64>> {
    let coords = array(value, "line coordinates")?
        .iter()
        .map(parse_coord)
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString(coords))
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>> {
    let mut rings = array(value, "polygon rings")?
        .iter()
        .map(parse_line)
        .collect::<Result<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next()
        .ok_or_else(|| anyhow!("[io::geojson::read] Invalid Polygon: missing exterior ring"))?;
    // Polygon::new closes any open ring.
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Parse a GeoJSON geometry object. `null` geometries parse to `None`.
pub(crate) fn parse_geometry(value: &Value) -> Result<Option<Geometry<f64>>> {
    if value.is_null() { return Ok(None) }

    let kind = value["type"].as_str()
        .ok_or_else(|| anyhow!("[io::geojson::read] geometry has no type"))?;
    let coords = &value["coordinates"];

    let geometry = match kind {
        "Point" => Geometry::Point(Point(parse_coord(coords)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint(
            array(coords, "MultiPoint coordinates")?.iter()
                .map(|c| parse_coord(c).map(Point))
                .collect::<Result<_>>()?
        )),
        "LineString" => Geometry::LineString(parse_line(coords)?),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString(
            array(coords, "MultiLineString coordinates")?.iter()
                .map(parse_line)
                .collect::<Result<_>>()?
        )),
        "Polygon" => Geometry::Polygon(parse_polygon(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon(
            array(coords, "MultiPolygon coordinates")?.iter()
                .map(parse_polygon)
                .collect::<Result<_>>()?
        )),
        "GeometryCollection" => Geometry::GeometryCollection(GeometryCollection(
            array(&value["geometries"], "geometries")?.iter()
                .filter_map(|g| parse_geometry(g).transpose())
                .collect::<Result<_>>()?
        )),
        other => bail!("[io::geojson::read] unsupported geometry type {other:?}"),
    };

    Ok(Some(geometry))
}

/// Read district polygons from a GeoJSON file.
pub fn read_districts(path: &Path, name_field: &str) -> Result<DistrictLayer> {
    let layer = read_districts_bytes(&read_bytes(path)?, name_field)
        .with_context(|| format!("[io::geojson::read] Failed to read districts from {}", path.display()))?;
    info!(path = %path.display(), districts = layer.len(), crs = %layer.crs(), "[io::geojson::read] loaded districts");
    Ok(layer)
}

/// Read district polygons from GeoJSON bytes. Features without a polygon or a name are skipped.
pub fn read_districts_bytes(bytes: &[u8], name_field: &str) -> Result<DistrictLayer> {
    let collection = parse_feature_collection(bytes)?;

    let districts = collection.features.into_iter().enumerate().filter_map(|(i, feature)| {
        let Some(name) = feature.properties.get(name_field).and_then(property_text) else {
            warn!(feature = i, field = name_field, "[io::geojson::read] district without a name, skipping");
            return None;
        };
        let shape = match feature.geometry {
            Some(Geometry::Polygon(polygon)) => MultiPolygon(vec![polygon]),
            Some(Geometry::MultiPolygon(shape)) => shape,
            _ => {
                warn!(district = %name, "[io::geojson::read] district is not a polygon, skipping");
                return None;
            }
        };
        Some((name, shape))
    });

    Ok(DistrictLayer::new(collection.crs, districts.collect::<Vec<_>>()))
}

/// Read street segments from a GeoJSON file.
pub fn read_streets(path: &Path, id_field: &str, district_field: &str) -> Result<StreetLayer> {
    let layer = read_streets_bytes(&read_bytes(path)?, id_field, district_field)
        .with_context(|| format!("[io::geojson::read] Failed to read streets from {}", path.display()))?;
    info!(path = %path.display(), streets = layer.len(), crs = %layer.crs(), "[io::geojson::read] loaded streets");
    Ok(layer)
}

/// Read street segments from GeoJSON bytes.
///
/// The id comes from `id_field` (falling back to the feature id), the district
/// from `district_field`, and every other numeric property becomes a score column.
pub fn read_streets_bytes(bytes: &[u8], id_field: &str, district_field: &str) -> Result<StreetLayer> {
    let collection = parse_feature_collection(bytes)?;

    let segments = collection.features.into_iter().enumerate().filter_map(|(i, feature)| {
        let id = feature.properties.get(id_field)
            .or(feature.id.as_ref())
            .and_then(property_text);
        let Some(id) = id else {
            warn!(feature = i, field = id_field, "[io::geojson::read] street without an id, skipping");
            return None;
        };
        let shape = match feature.geometry {
            Some(Geometry::LineString(line)) => MultiLineString(vec![line]),
            Some(Geometry::MultiLineString(lines)) => lines,
            _ => {
                warn!(street = %id, "[io::geojson::read] street is not a line, skipping");
                return None;
            }
        };

        let mut segment = StreetSegment::new(id, shape);
        if let Some(district) = feature.properties.get(district_field).and_then(property_text) {
            segment = segment.with_district(district);
        }
        for (column, value) in &feature.properties {
            if column == id_field || column == district_field { continue }
            if let Some(score) = value.as_f64() {
                segment = segment.with_score(column.clone(), score);
            }
        }
        Some(segment)
    });

    Ok(StreetLayer::new(collection.crs, segments.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreField;

    const DISTRICTS: &str = r#"{
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::25832" } },
        "features": [
            { "type": "Feature", "properties": { "NAME_STADT": "Mitte" },
              "geometry": { "type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10]]] } },
            { "type": "Feature", "properties": { "NAME_STADT": "Ost" },
              "geometry": { "type": "MultiPolygon", "coordinates": [[[[10,0],[20,0],[20,10],[10,10],[10,0]]]] } },
            { "type": "Feature", "properties": { "NAME_STADT": "Nowhere" }, "geometry": null },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] } }
        ]
    }"#;

    const STREETS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature",
              "properties": { "Unique_ID": 101, "District": "Mitte", "Proximity Score": 61.5,
                              "Walkability Score - August": 40, "Surface": "asphalt", "Comfort": null },
              "geometry": { "type": "LineString", "coordinates": [[1,1],[2,2]] } },
            { "type": "Feature", "id": "fallback",
              "properties": { "District": "Ost" },
              "geometry": { "type": "MultiLineString", "coordinates": [[[11,1],[12,2]],[[12,2],[13,2]]] } },
            { "type": "Feature", "properties": { "Unique_ID": "p" },
              "geometry": { "type": "Point", "coordinates": [5,5] } }
        ]
    }"#;

    #[test]
    fn districts_with_crs() {
        let layer = read_districts_bytes(DISTRICTS.as_bytes(), "NAME_STADT").unwrap();
        assert_eq!(layer.crs().epsg(), 25832);
        assert_eq!(layer.names(), vec!["Mitte", "Ost"]);
        // Open ring was closed on read.
        let ring = layer.get("Mitte").unwrap().shape().0[0].exterior();
        assert_eq!(ring.0.first(), ring.0.last());
    }

    #[test]
    fn streets_and_scores() {
        let layer = read_streets_bytes(STREETS.as_bytes(), "Unique_ID", "District").unwrap();
        assert_eq!(layer.crs(), Crs::WGS84);
        assert_eq!(layer.len(), 2);

        let first = layer.get("101").unwrap();
        assert_eq!(first.district(), Some("Mitte"));
        assert_eq!(first.field_score(ScoreField::Proximity), 61.5);
        assert_eq!(first.field_score(ScoreField::WalkabilityAugust), 40.0);
        assert!(first.raw_score("Surface").is_none());
        assert!(first.raw_score("Comfort").is_none());

        let second = layer.get("fallback").unwrap();
        assert_eq!(second.shape().0.len(), 2);
        assert!(second.scores().is_empty());
    }

    #[test]
    fn rejects_non_collections_and_bad_positions() {
        assert!(parse_feature_collection(br#"{"type":"Feature"}"#).is_err());
        assert!(parse_geometry(&serde_json::json!({"type":"Point","coordinates":["a",1]})).is_err());
        assert!(parse_geometry(&serde_json::json!({"type":"Circle","coordinates":[0,0]})).is_err());
        assert!(parse_geometry(&Value::Null).unwrap().is_none());
    }
}
