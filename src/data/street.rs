use std::collections::BTreeMap;

use ahash::AHashMap;
use anyhow::Result;
use geo::{BoundingRect, MultiLineString, Rect};
use rstar::{RTree, AABB};
use tracing::warn;

use crate::geom::{merge_rects, BoundingBox, Crs, Reprojector};
use crate::score::{ScoreCategory, ScoreField};

/// A street segment with its precomputed scores.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSegment {
    id: String,
    district: Option<String>,
    shape: MultiLineString<f64>,
    scores: BTreeMap<String, f64>,
}

impl StreetSegment {
    pub fn new(id: impl Into<String>, shape: MultiLineString<f64>) -> Self {
        Self { id: id.into(), district: None, shape, scores: BTreeMap::new() }
    }

    /// Set the district attribute.
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Set a named score column.
    pub fn with_score(mut self, column: impl Into<String>, value: f64) -> Self {
        self.scores.insert(column.into(), value);
        self
    }

    #[inline] pub fn id(&self) -> &str { &self.id }

    /// District attribute as recorded in the dataset (not derived from geometry).
    #[inline] pub fn district(&self) -> Option<&str> { self.district.as_deref() }

    #[inline] pub fn shape(&self) -> &MultiLineString<f64> { &self.shape }

    /// Every score column present on this segment.
    #[inline] pub fn scores(&self) -> &BTreeMap<String, f64> { &self.scores }

    /// A score column if present and not NaN.
    pub fn raw_score(&self, column: &str) -> Option<f64> {
        self.scores.get(column).copied().filter(|v| !v.is_nan())
    }

    /// A score column, with absent values reading as 0.
    #[inline]
    pub fn score(&self, column: &str) -> f64 { self.raw_score(column).unwrap_or(0.0) }

    #[inline]
    pub fn field_score(&self, field: ScoreField) -> f64 { self.score(field.column()) }

    /// Category of a known score field, using the field's own threshold table.
    #[inline]
    pub fn category(&self, field: ScoreField) -> ScoreCategory {
        field.scale().classify(self.field_score(field))
    }

    fn reprojected(&self, reprojector: &Reprojector) -> Result<Self> {
        Ok(Self { shape: reprojector.geometry(&self.shape)?, ..self.clone() })
    }
}

/// All street segments, in one CRS, with an R-tree over their bounding boxes.
#[derive(Debug, Clone)]
pub struct StreetLayer {
    crs: Crs,
    segments: Vec<StreetSegment>,
    rtree: RTree<BoundingBox>,
    by_id: AHashMap<String, usize>,
}

impl StreetLayer {
    pub fn new(crs: Crs, segments: Vec<StreetSegment>) -> Self {
        let rtree = RTree::bulk_load(
            segments.iter().enumerate()
                .filter_map(|(i, segment)| segment.shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                .collect()
        );

        let mut by_id = AHashMap::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            if by_id.contains_key(segment.id()) {
                warn!(street = segment.id(), "[data::street] duplicate street id, lookups return the first");
                continue;
            }
            by_id.insert(segment.id.clone(), i);
        }

        Self { crs, segments, rtree, by_id }
    }

    #[inline] pub fn crs(&self) -> Crs { self.crs }

    #[inline] pub fn len(&self) -> usize { self.segments.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    #[inline] pub fn segments(&self) -> &[StreetSegment] { &self.segments }

    /// Look a segment up by its identifier.
    pub fn get(&self, id: &str) -> Option<&StreetSegment> {
        self.by_id.get(id).map(|&i| &self.segments[i])
    }

    /// Indices of segments whose bounding box intersects the envelope.
    pub(crate) fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item = usize> + '_ {
        self.rtree.locate_in_envelope_intersecting(envelope).map(BoundingBox::idx)
    }

    /// Bounding rectangle of every segment.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.segments.iter()
            .filter_map(|segment| segment.shape.bounding_rect())
            .reduce(merge_rects)
    }

    /// Copy of this layer in another CRS.
    pub fn reproject(&self, target: Crs) -> Result<Self> {
        let reprojector = Reprojector::new(self.crs, target)?;
        if reprojector.is_identity() { return Ok(self.clone()) }

        let segments = self.segments.iter()
            .map(|segment| segment.reprojected(&reprojector))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(target, segments))
    }
}
