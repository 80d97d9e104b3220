//! Polygon boolean operations.
//!
//! Thin layer over `i_overlay`: polygons are converted to open `[f64; 2]`
//! contours, overlaid with the even-odd fill rule, and the resulting shapes
//! are converted back into closed-ring [`Polygon`]s. Shapes whose outer ring
//! collapses below a triangle are dropped.

use super::core::Polygon;
use super::ring::Ring;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

type Contour = Vec<[f64; 2]>;
type Shape = Vec<Contour>;

/// Intersects `polygon` with the area bounded by `clip`.
///
/// The result may hold several disjoint polygons (a concave polygon clipped
/// by a half-plane can fall apart into pieces) or none at all.
pub fn polygon_intersection(polygon: &Polygon, clip: &Ring) -> Vec<Polygon> {
    let subject = to_shape(polygon);
    let clip = to_contour(clip);
    let shapes = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);
    from_shapes(shapes)
}

/// Unions every polygon in `polygons`.
///
/// Returns one polygon per connected component; holes enclosed by the union
/// are kept. Inputs are folded in order, so each step overlays the
/// accumulated (non-overlapping) shapes with one more polygon and even-odd
/// filling never cancels overlapping inputs.
pub fn polygon_union(polygons: &[Polygon]) -> Vec<Polygon> {
    let mut iter = polygons.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut shapes: Vec<Shape> = vec![to_shape(first)];
    for polygon in iter {
        let next = to_shape(polygon);
        shapes = shapes.overlay(&next, OverlayRule::Union, FillRule::EvenOdd);
    }

    from_shapes(shapes)
}

fn to_contour(ring: &Ring) -> Contour {
    // i_overlay contours are implicitly closed.
    ring.open().iter().map(|&p| p.into()).collect()
}

fn to_shape(polygon: &Polygon) -> Shape {
    polygon.rings().map(to_contour).collect()
}

fn from_shapes(shapes: Vec<Shape>) -> Vec<Polygon> {
    shapes.into_iter().filter_map(from_shape).collect()
}

fn from_shape(shape: Shape) -> Option<Polygon> {
    let rings: Vec<Ring> = shape
        .into_iter()
        .map(|contour| Ring::from_coords(&contour))
        .collect();
    let polygon = Polygon::from_rings(rings)?;
    if polygon.exterior().is_degenerate() {
        return None;
    }
    // Collapsed holes carry no area; drop them rather than the polygon.
    let holes = polygon
        .holes()
        .iter()
        .filter(|h| !h.is_degenerate())
        .cloned()
        .collect();
    Some(Polygon::new(polygon.exterior().clone(), holes))
}
