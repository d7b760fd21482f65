use std::fmt;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, MapCoords};
use proj4rs::{proj::Proj as Proj4, transform::transform};

/// A coordinate reference system, identified by its EPSG code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crs {
    epsg: u32,
}

impl Crs {
    /// WGS 84 lon/lat, the GeoJSON default.
    pub const WGS84: Crs = Crs { epsg: 4326 };

    /// Build from an EPSG code, rejecting codes with no known PROJ.4 definition.
    pub fn from_epsg(epsg: u32) -> Result<Self> {
        let crs = Self { epsg };
        crs.proj4()?;
        Ok(crs)
    }

    /// Parse a CRS name as found in GeoJSON `crs` members or on the command line:
    /// `urn:ogc:def:crs:EPSG::25832`, `EPSG:25832`, `25832`, or `urn:ogc:def:crs:OGC:1.3:CRS84`.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.to_ascii_uppercase().ends_with("CRS84") { return Ok(Self::WGS84) }

        let code = name.rsplit(':')
            .find(|part| !part.is_empty())
            .ok_or_else(|| anyhow!("[geom::proj] empty CRS name"))?;
        let epsg = code.parse::<u32>()
            .with_context(|| format!("[geom::proj] cannot read an EPSG code from {name:?}"))?;
        Self::from_epsg(epsg)
    }

    #[inline] pub fn epsg(self) -> u32 { self.epsg }

    /// True for lon/lat systems (coordinates in degrees).
    #[inline]
    pub fn is_geographic(self) -> bool { matches!(self.epsg, 4326 | 4258) }

    /// OGC URN form used when writing GeoJSON.
    pub fn urn(self) -> String { format!("urn:ogc:def:crs:EPSG::{}", self.epsg) }

    /// PROJ.4 definition for the supported codes.
    pub(crate) fn proj4(self) -> Result<String> {
        let definition = match self.epsg {
            4326 => "+proj=longlat +datum=WGS84 +no_defs".to_string(),
            4258 => "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs".to_string(),
            3857 => "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs".to_string(),
            // ETRS89 / UTM zones 31N-33N
            code @ 25831..=25833 => format!(
                "+proj=utm +zone={} +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs", code - 25800),
            // WGS 84 / UTM north and south
            code @ 32601..=32660 => format!("+proj=utm +zone={} +datum=WGS84 +units=m +no_defs", code - 32600),
            code @ 32701..=32760 => format!("+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs", code - 32700),
            // DHDN / 3-degree Gauss-Kruger zones 2-5
            code @ 31466..=31469 => {
                let zone = code - 31464;
                format!(
                    "+proj=tmerc +lat_0=0 +lon_0={} +k=1 +x_0={}500000 +y_0=0 +ellps=bessel \
                     +towgs84=598.1,73.7,418.2,0.202,0.045,-2.455,6.7 +units=m +no_defs",
                    zone * 3, zone,
                )
            }
            code => bail!("[geom::proj] unsupported CRS EPSG:{code}"),
        };
        Ok(definition)
    }
}

impl Default for Crs {
    fn default() -> Self { Self::WGS84 }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

/// Transforms coordinates between two reference systems.
pub struct Reprojector {
    source: Crs,
    target: Crs,
    from: Proj4,
    to: Proj4,
}

impl Reprojector {
    pub fn new(source: Crs, target: Crs) -> Result<Self> {
        let build = |crs: Crs| -> Result<Proj4> {
            let proj_string = crs.proj4()?;
            Proj4::from_proj_string(&proj_string)
                .with_context(|| format!("[geom::proj] failed to build PROJ.4: {proj_string}"))
        };
        Ok(Self { source, target, from: build(source)?, to: build(target)? })
    }

    #[inline] pub fn target(&self) -> Crs { self.target }

    /// True when source and target are the same system.
    #[inline] pub fn is_identity(&self) -> bool { self.source == self.target }

    /// Transform a single coordinate. Geographic systems take and return degrees.
    pub fn coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        if self.is_identity() { return Ok(coord) }

        let mut point = if self.source.is_geographic() {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };

        transform(&self.from, &self.to, &mut point)
            .map_err(|e| anyhow!("[geom::proj] {} -> {} failed at ({}, {}): {e}", self.source, self.target, coord.x, coord.y))?;

        Ok(if self.target.is_geographic() {
            Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
        } else {
            Coord { x: point.0, y: point.1 }
        })
    }

    /// Transform every coordinate of a geometry.
    pub fn geometry<G>(&self, geometry: &G) -> Result<G>
    where
        G: MapCoords<f64, f64, Output = G>,
    {
        geometry.try_map_coords(|coord| self.coord(coord))
    }
}
