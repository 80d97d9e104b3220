//! Ring-aware simplification of polygon geometry.
//!
//! Every ring (outer and holes, across all polygons of a multi-polygon) is
//! simplified independently with [`rdp`](super::rdp). A ring never drops
//! below a valid triangle: when simplification would leave fewer than three
//! distinct positions the original ring is kept.

use super::rdp::rdp;
use crate::polygon::{close_ring, Geometry, Polygon, Ring};
use num_traits::Float;

/// Rings with this many positions or fewer (a closed triangle) are never
/// simplified.
const MIN_SIMPLIFIABLE_LEN: usize = 4;

/// Simplifies one ring, returning a closed ring with at least three distinct
/// positions.
///
/// # Example
///
/// ```
/// use regionedit::polygon::Ring;
/// use regionedit::simplify::simplify_ring;
///
/// // A square with a barely-bent bottom edge.
/// let ring = Ring::from_coords(&[[0.0, 0.0], [1.0, 0.001], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
/// let simplified = simplify_ring(&ring, 0.01);
/// assert_eq!(simplified.len(), 5);
/// ```
pub fn simplify_ring<F: Float>(ring: &Ring<F>, epsilon: F) -> Ring<F> {
    if ring.len() <= MIN_SIMPLIFIABLE_LEN {
        return ring.clone();
    }

    let kept = rdp(ring.open(), epsilon);
    if kept.len() < 3 {
        return ring.clone();
    }

    let simplified = close_ring(kept);
    if simplified.distinct_count() < 3 {
        return ring.clone();
    }
    simplified
}

/// Simplifies every ring of a polygon, keeping holes in place.
pub fn simplify_polygon<F: Float>(polygon: &Polygon<F>, epsilon: F) -> Polygon<F> {
    polygon.map_rings(|ring| simplify_ring(ring, epsilon))
}

/// Simplifies a polygon or multi-polygon. `epsilon` is a perpendicular
/// distance in coordinate units; negative values behave like zero.
pub fn simplify<F: Float>(geometry: &Geometry<F>, epsilon: F) -> Geometry<F> {
    let epsilon = epsilon.max(F::zero());
    match geometry {
        Geometry::Polygon(polygon) => Geometry::Polygon(simplify_polygon(polygon, epsilon)),
        Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons
                .iter()
                .map(|p| simplify_polygon(p, epsilon))
                .collect(),
        ),
    }
}

/// Total number of positions across every ring, closing positions included.
#[inline]
pub fn count_points<F: Float>(geometry: &Geometry<F>) -> usize {
    geometry.count_points()
}
