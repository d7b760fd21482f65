use geo::Rect;
use rstar::{RTreeObject, AABB};

/// A bounding box in an R-tree, associated with a street segment by index.
#[derive(Debug, Clone)]
pub(crate) struct BoundingBox {
    idx: usize, // Index of corresponding segment in the layer
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(crate) fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    /// Get the index of the corresponding segment.
    pub(crate) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { envelope_of(&self.bbox) }
}

/// Envelope covering a rectangle, for R-tree queries.
#[inline]
pub(crate) fn envelope_of(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(rect.min().into(), rect.max().into())
}

/// Smallest rectangle covering both inputs.
#[inline]
pub(crate) fn merge_rects(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        geo::Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        geo::Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}
