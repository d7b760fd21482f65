use ahash::AHashMap;
use anyhow::Result;
use geo::{BoundingRect, Centroid, MultiPolygon, Point, Rect};
use tracing::warn;

use crate::geom::{merge_rects, Crs, Reprojector};

/// A named district boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct District {
    name: String,
    shape: MultiPolygon<f64>,
    crs: Crs,
}

impl District {
    pub fn new(name: impl Into<String>, shape: MultiPolygon<f64>, crs: Crs) -> Self {
        Self { name: name.into(), shape, crs }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn shape(&self) -> &MultiPolygon<f64> { &self.shape }

    #[inline] pub fn crs(&self) -> Crs { self.crs }

    #[inline] pub fn bounds(&self) -> Option<Rect<f64>> { self.shape.bounding_rect() }

    /// Area-weighted centroid, in the district's CRS.
    #[inline] pub fn centroid(&self) -> Option<Point<f64>> { self.shape.centroid() }

    /// Copy of this district in another CRS.
    pub fn reprojected(&self, reprojector: &Reprojector) -> Result<Self> {
        Ok(Self {
            name: self.name.clone(),
            shape: reprojector.geometry(&self.shape)?,
            crs: reprojector.target(),
        })
    }
}

/// All districts of the city, in one CRS, keyed by unique name.
#[derive(Debug, Clone)]
pub struct DistrictLayer {
    crs: Crs,
    districts: Vec<District>,
    by_name: AHashMap<String, usize>,
}

impl DistrictLayer {
    /// Build a layer from (name, shape) pairs. A repeated name keeps its first shape.
    pub fn new(crs: Crs, districts: impl IntoIterator<Item = (String, MultiPolygon<f64>)>) -> Self {
        let mut layer = Self { crs, districts: Vec::new(), by_name: AHashMap::new() };
        for (name, shape) in districts {
            if layer.by_name.contains_key(&name) {
                warn!(district = %name, "[data::district] duplicate district name, keeping first geometry");
                continue;
            }
            layer.by_name.insert(name.clone(), layer.districts.len());
            layer.districts.push(District::new(name, shape, crs));
        }
        layer
    }

    #[inline] pub fn crs(&self) -> Crs { self.crs }

    #[inline] pub fn len(&self) -> usize { self.districts.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.districts.is_empty() }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &District> { self.districts.iter() }

    /// District names, in dataset order.
    pub fn names(&self) -> Vec<&str> {
        self.districts.iter().map(District::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&District> {
        self.by_name.get(name).map(|&i| &self.districts[i])
    }

    /// Bounding rectangle of every district.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.districts.iter()
            .filter_map(District::bounds)
            .reduce(merge_rects)
    }

    /// Copy of this layer in another CRS.
    pub fn reproject(&self, target: Crs) -> Result<Self> {
        let reprojector = Reprojector::new(self.crs, target)?;
        if reprojector.is_identity() { return Ok(self.clone()) }

        let districts = self.districts.iter()
            .map(|district| district.reprojected(&reprojector))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { crs: target, districts, by_name: self.by_name.clone() })
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x, y: y), (x: x + size, y: y), (x: x + size, y: y + size), (x: x, y: y + size), (x: x, y: y),
        ]])
    }

    #[test]
    fn lookup_and_duplicates() {
        let layer = DistrictLayer::new(Crs::WGS84, vec![
            ("Mitte".to_string(), square(0.0, 0.0, 1.0)),
            ("Ost".to_string(), square(1.0, 0.0, 1.0)),
            ("Mitte".to_string(), square(5.0, 5.0, 1.0)),
        ]);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.names(), vec!["Mitte", "Ost"]);
        assert_eq!(layer.get("Mitte").unwrap().shape(), &square(0.0, 0.0, 1.0));
        assert!(layer.get("West").is_none());
    }

    #[test]
    fn bounds_cover_all_districts() {
        let layer = DistrictLayer::new(Crs::WGS84, vec![
            ("A".to_string(), square(0.0, 0.0, 1.0)),
            ("B".to_string(), square(3.0, 2.0, 1.0)),
        ]);
        let bounds = layer.bounds().unwrap();
        assert_eq!(bounds.min(), geo::Coord { x: 0.0, y: 0.0 });
        assert_eq!(bounds.max(), geo::Coord { x: 4.0, y: 3.0 });
    }

    #[test]
    fn centroid_of_square() {
        let district = District::new("A", square(0.0, 0.0, 2.0), Crs::WGS84);
        let centroid = district.centroid().unwrap();
        assert!((centroid.x() - 1.0).abs() < 1e-12 && (centroid.y() - 1.0).abs() < 1e-12);
    }
}
