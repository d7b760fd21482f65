use anyhow::{ensure, Result};
use geo::{BoundingRect, Intersects, MultiLineString, MultiPolygon};
use tracing::debug;

use crate::data::{District, StreetLayer, StreetSegment};
use crate::geom::envelope_of;

/// Every segment whose geometry touches or overlaps the district polygon, in layer order.
///
/// Both inputs must be in the same CRS; mismatched systems are rejected rather
/// than compared (reproject one side first, see [`StreetLayer::reproject`]).
pub fn segments_in<'a>(district: &District, streets: &'a StreetLayer) -> Result<Vec<&'a StreetSegment>> {
    ensure!(district.crs() == streets.crs(),
        "[geom::filter] district {:?} is in {} but streets are in {}; reproject before filtering",
        district.name(), district.crs(), streets.crs());

    let Some(rect) = district.shape().bounding_rect() else { return Ok(Vec::new()) };

    let mut candidates: Vec<usize> = streets.query(&envelope_of(&rect)).collect();
    candidates.sort_unstable();

    let segments = streets.segments();
    let hits: Vec<&StreetSegment> = candidates.into_iter()
        .map(|i| &segments[i])
        .filter(|segment| intersects(district.shape(), segment.shape()))
        .collect();

    debug!(district = district.name(), segments = hits.len(), "[geom::filter] segments in district");
    Ok(hits)
}

/// Standard 2-D intersection: any line of the segment meets any polygon, boundary included.
fn intersects(area: &MultiPolygon<f64>, lines: &MultiLineString<f64>) -> bool {
    lines.0.iter().any(|line| area.0.iter().any(|polygon| polygon.intersects(line)))
}

#[cfg(test)]
mod tests {
    use geo::{line_string, polygon, MultiLineString, MultiPolygon};

    use super::*;
    use crate::geom::Crs;

    fn street(id: &str, from: (f64, f64), to: (f64, f64)) -> StreetSegment {
        StreetSegment::new(id, MultiLineString(vec![line_string![(x: from.0, y: from.1), (x: to.0, y: to.1)]]))
    }

    fn square(name: &str, x0: f64, y0: f64, x1: f64, y1: f64, crs: Crs) -> District {
        let shape = MultiPolygon(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1), (x: x0, y: y0)]]);
        District::new(name, shape, crs)
    }

    fn layer() -> StreetLayer {
        StreetLayer::new(Crs::WGS84, vec![
            street("inside", (0.2, 0.2), (0.8, 0.8)),
            street("crossing", (0.5, 0.5), (2.0, 0.5)),
            street("touching", (1.0, 0.0), (1.5, -1.0)),
            street("outside", (3.0, 3.0), (4.0, 4.0)),
            street("bbox-only", (1.2, 0.9), (0.9, 1.2)),
        ])
    }

    fn ids(segments: &[&StreetSegment]) -> Vec<String> {
        segments.iter().map(|s| s.id().to_string()).collect()
    }

    #[test]
    fn inside_crossing_and_touching() {
        let district = square("unit", 0.0, 0.0, 1.0, 1.0, Crs::WGS84);
        let streets = layer();
        let hits = segments_in(&district, &streets).unwrap();
        assert_eq!(ids(&hits), vec!["inside", "crossing", "touching"]);
    }

    #[test]
    fn nothing_intersects() {
        let district = square("far", 10.0, 10.0, 11.0, 11.0, Crs::WGS84);
        let streets = layer();
        assert!(segments_in(&district, &streets).unwrap().is_empty());
    }

    #[test]
    fn covering_district_returns_everything() {
        let streets = layer();
        let b = streets.bounds().unwrap();
        let district = square("all", b.min().x, b.min().y, b.max().x, b.max().y, Crs::WGS84);
        assert_eq!(segments_in(&district, &streets).unwrap().len(), streets.len());
    }

    #[test]
    fn idempotent() {
        let district = square("unit", 0.0, 0.0, 1.0, 1.0, Crs::WGS84);
        let streets = layer();
        let first = ids(&segments_in(&district, &streets).unwrap());
        let second = ids(&segments_in(&district, &streets).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn mismatched_crs_is_rejected() {
        let district = square("unit", 0.0, 0.0, 1.0, 1.0, Crs::from_epsg(25832).unwrap());
        let streets = layer();
        let err = segments_in(&district, &streets).unwrap_err();
        assert!(err.to_string().contains("reproject"));
    }
}
