//! GeoJSON writing operations.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use serde_json::{json, Value};
use tracing::info;

use crate::geom::{Crs, Reprojector};
use crate::io::geojson::read::{parse_crs, parse_geometry};

#[inline]
fn coord_to_geojson(coord: &Coord<f64>) -> Value { json!([coord.x, coord.y]) }

fn line_to_geojson(line: &LineString<f64>) -> Value {
    Value::Array(line.0.iter().map(coord_to_geojson).collect())
}

fn polygon_rings(polygon: &Polygon<f64>) -> Value {
    Value::Array(
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(line_to_geojson)
            .collect()
    )
}

/// Convert a MultiPolygon to a GeoJSON geometry object.
pub(crate) fn multipolygon_to_geojson(shape: &MultiPolygon<f64>) -> Value {
    json!({
        "type": "MultiPolygon",
        "coordinates": shape.0.iter().map(polygon_rings).collect::<Vec<_>>(),
    })
}

/// Convert a MultiLineString to a GeoJSON geometry object.
pub(crate) fn multilinestring_to_geojson(shape: &MultiLineString<f64>) -> Value {
    json!({
        "type": "MultiLineString",
        "coordinates": shape.0.iter().map(line_to_geojson).collect::<Vec<_>>(),
    })
}

/// Convert any geometry to a GeoJSON geometry object.
pub(crate) fn geometry_to_geojson(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Point(point) => json!({ "type": "Point", "coordinates": coord_to_geojson(&point.0) }),
        Geometry::MultiPoint(points) => json!({
            "type": "MultiPoint",
            "coordinates": points.0.iter().map(|p| coord_to_geojson(&p.0)).collect::<Vec<_>>(),
        }),
        Geometry::Line(line) => json!({
            "type": "LineString",
            "coordinates": [coord_to_geojson(&line.start), coord_to_geojson(&line.end)],
        }),
        Geometry::LineString(line) => json!({ "type": "LineString", "coordinates": line_to_geojson(line) }),
        Geometry::MultiLineString(lines) => multilinestring_to_geojson(lines),
        Geometry::Polygon(polygon) => json!({ "type": "Polygon", "coordinates": polygon_rings(polygon) }),
        Geometry::MultiPolygon(shape) => multipolygon_to_geojson(shape),
        Geometry::Rect(rect) => json!({ "type": "Polygon", "coordinates": polygon_rings(&rect.to_polygon()) }),
        Geometry::Triangle(triangle) => json!({ "type": "Polygon", "coordinates": polygon_rings(&triangle.to_polygon()) }),
        Geometry::GeometryCollection(collection) => json!({
            "type": "GeometryCollection",
            "geometries": collection.0.iter().map(geometry_to_geojson).collect::<Vec<_>>(),
        }),
    }
}

/// Wrap features in a FeatureCollection. Non-WGS84 layers carry a legacy `crs` member.
pub(crate) fn feature_collection(crs: Crs, features: Vec<Value>) -> Value {
    let mut collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    if crs != Crs::WGS84 {
        collection["crs"] = json!({ "type": "name", "properties": { "name": crs.urn() } });
    }
    collection
}

/// Write a JSON value to a file.
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::geojson::write] Failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("[io::geojson::write] Failed to write {}", path.display()))
}

/// Reproject every feature of a GeoJSON FeatureCollection, keeping properties and ids.
pub fn reproject_geojson_bytes(bytes: &[u8], target: Crs) -> Result<Value> {
    let mut collection: Value = serde_json::from_slice(bytes)
        .context("[io::geojson::write] Failed to parse GeoJSON bytes")?;
    let reprojector = Reprojector::new(parse_crs(&collection)?, target)?;

    let features = collection["features"].as_array_mut()
        .context("[io::geojson::write] FeatureCollection has no features array")?;
    for (i, feature) in features.iter_mut().enumerate() {
        let Some(geometry) = parse_geometry(&feature["geometry"])
            .with_context(|| format!("[io::geojson::write] invalid geometry in feature {i}"))? else { continue };
        feature["geometry"] = geometry_to_geojson(&reprojector.geometry(&geometry)?);
    }

    if let Some(object) = collection.as_object_mut() { object.remove("crs"); }
    if target != Crs::WGS84 {
        collection["crs"] = json!({ "type": "name", "properties": { "name": target.urn() } });
    }
    Ok(collection)
}

/// Reproject a GeoJSON file into `target`, returning the number of features written.
pub fn reproject_file(input: &Path, output: &Path, target: Crs) -> Result<usize> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("[io::geojson::write] Failed to open {}", input.display()))?;
    let collection = reproject_geojson_bytes(&bytes, target)
        .with_context(|| format!("[io::geojson::write] Failed to reproject {}", input.display()))?;
    write_json(output, &collection)?;

    let count = collection["features"].as_array().map_or(0, Vec::len);
    info!(input = %input.display(), output = %output.display(), features = count, crs = %target, "[io::geojson::write] reprojected");
    Ok(count)
}
