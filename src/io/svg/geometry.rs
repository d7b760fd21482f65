//! Path building for SVG output.

use std::io::Write;

use anyhow::Result;
use geo::{Coord, CoordsIter, LineString, MultiLineString, MultiPolygon, Rect};

use crate::io::svg::escape_xml;

/// Projection function: data coords -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Linear projection of `bounds` into a `width`-wide canvas with `margin`, Y flipped.
/// Returns the projection and the resulting canvas height.
pub(crate) fn fit_to_width(bounds: Rect<f64>, width: f64, margin: f64) -> (impl Fn(&Coord<f64>) -> (f64, f64), f64) {
    let span = bounds.width().max(bounds.height()).max(f64::EPSILON);
    let scale = (width - 2.0 * margin) / if bounds.width() > 0.0 { bounds.width() } else { span };
    let height = bounds.height() * scale + 2.0 * margin;

    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min().x) * scale;
        let y = margin + (bounds.max().y - coord.y) * scale; // invert vertically
        (x, y)
    };
    (project, height)
}

/// Draw district outlines, optionally highlighting one of them.
pub(crate) fn draw_districts(
    writer: &mut impl Write,
    districts: &[(&str, &MultiPolygon<f64>)],
    selected: Option<&str>,
    project: &Projection,
) -> Result<()> {
    for &(name, shape) in districts {
        let class = if selected == Some(name) { "district selected" } else { "district" };
        writeln!(writer, r#"<path class="{class}" d="{}"><title>{}</title></path>"#,
            multipolygon_to_path(shape, project), escape_xml(name))?;
    }
    Ok(())
}

/// Draw one street with a stroke color and a hover title.
pub(crate) fn draw_street(
    writer: &mut impl Write,
    shape: &MultiLineString<f64>,
    color: &str,
    title: &str,
    project: &Projection,
) -> Result<()> {
    writeln!(writer, r#"<path class="street" d="{}" style="stroke:{color}"><title>{}</title></path>"#,
        multilinestring_to_path(shape, project), escape_xml(title))?;
    Ok(())
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&line_to_path(polygon.exterior(), project, true));
        for interior in polygon.interiors() {
            out.push_str(&line_to_path(interior, project, true));
        }
    }

    out
}

/// Build an open SVG path string for a MultiLineString.
fn multilinestring_to_path(shape: &MultiLineString<f64>, project: &Projection) -> String {
    shape.0.iter()
        .map(|line| line_to_path(line, project, false))
        .collect()
}

/// Build a compact SVG path string for a LineString, closing it when it is a ring.
fn line_to_path(line: &LineString<f64>, project: &Projection, close: bool) -> String {
    let mut out = String::new();

    let mut coords = line.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        if close { out.push('Z') }
    }

    out
}

#[cfg(test)]
mod tests {
    use geo::{line_string, MultiLineString};

    use super::*;

    #[test]
    fn projection_flips_y_and_keeps_margin() {
        let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 5.0 });
        let (project, height) = fit_to_width(bounds, 120.0, 10.0);
        assert_eq!(height, 70.0);
        assert_eq!(project(&Coord { x: 0.0, y: 5.0 }), (10.0, 10.0));
        assert_eq!(project(&Coord { x: 10.0, y: 0.0 }), (110.0, 60.0));
    }

    #[test]
    fn open_paths_for_streets() {
        let shape = MultiLineString(vec![line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let path = multilinestring_to_path(&shape, &|c: &Coord<f64>| (c.x, c.y));
        assert_eq!(path, " M0.000,0.000 L1.000,1.000");
    }
}
