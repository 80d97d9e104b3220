//! Cutting a polygon along a drawn line.
//!
//! The line is extended well past the polygon on both ends, two oversized
//! half-plane polygons are built on either side of it, and the polygon is
//! intersected with each. Every non-degenerate piece becomes one result.

use super::boolean::polygon_intersection;
use super::core::Polygon;
use super::ring::Ring;
use crate::error::SplitError;
use crate::primitives::{Position, Vec2};
use crate::tolerance::line_intersections;
use tracing::debug;

/// Parametric tolerance for boundary crossings.
const CROSSING_EPS: f64 = 1e-12;

/// Splits `polygon` along `cutting_line` into two or more polygons.
///
/// The line needs at least two positions and must cross the polygon's
/// boundary at least twice. Either traversal direction works. For poly-lines
/// only the first and last two positions steer the extension; the interior
/// positions are kept as drawn.
///
/// The half-planes are padded by twice the larger side of the polygon's
/// bounding box. This covers any straight cut; a poly-line that wanders far
/// outside the polygon before coming back may leave pieces uncovered.
///
/// # Example
///
/// ```
/// use regionedit::polygon::{split, Polygon};
/// use regionedit::Position;
///
/// let square = Polygon::from_coords(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
/// let cut = [Position::new(1.0, -1.0), Position::new(1.0, 3.0)];
///
/// let pieces = split(&square, &cut).unwrap();
/// assert_eq!(pieces.len(), 2);
/// ```
pub fn split(polygon: &Polygon, cutting_line: &[Position]) -> Result<Vec<Polygon>, SplitError> {
    if cutting_line.len() < 2 {
        return Err(SplitError::CuttingLineTooShort);
    }

    let crossings: usize = polygon
        .rings()
        .map(|ring| line_intersections(ring.positions(), cutting_line, CROSSING_EPS).len())
        .sum();
    if crossings < 2 {
        debug!(crossings, "cutting line does not cross polygon");
        return Err(SplitError::LineDoesNotCross);
    }

    let padding = polygon
        .bounds()
        .map(|b| 2.0 * b.max_extent())
        .unwrap_or(0.0);
    let (side_a, side_b) = half_planes(cutting_line, padding)?;

    let pieces: Vec<Polygon> = [side_a, side_b]
        .iter()
        .flat_map(|half_plane| polygon_intersection(polygon, half_plane))
        .filter(|piece| piece.exterior().len() >= 4)
        .collect();

    if pieces.len() < 2 {
        debug!(pieces = pieces.len(), "cutting line did not separate polygon");
        return Err(SplitError::NoSplit);
    }
    Ok(pieces)
}

/// Builds the two closed half-plane rings on either side of the extended
/// cutting line.
pub(crate) fn half_planes(cutting_line: &[Position], padding: f64) -> Result<(Ring, Ring), SplitError> {
    let extended = extend_line(cutting_line, padding)?;

    let (Some(&start), Some(&end)) = (extended.first(), extended.last()) else {
        return Err(SplitError::CuttingLineTooShort);
    };
    let perp = (end - start)
        .perpendicular()
        .with_length(padding)
        .ok_or(SplitError::DegenerateCuttingLine)?;

    Ok((offset_side(&extended, perp), offset_side(&extended, -perp)))
}

/// Prepends and appends a point `padding` beyond each end of the line,
/// continuing the direction of its first and last segments.
fn extend_line(line: &[Position], padding: f64) -> Result<Vec<Position>, SplitError> {
    let n = line.len();
    if n < 2 {
        return Err(SplitError::CuttingLineTooShort);
    }
    let outward = |from: Position, to: Position| -> Result<Vec2, SplitError> {
        (to - from)
            .with_length(padding)
            .ok_or(SplitError::DegenerateCuttingLine)
    };

    let head = line[0] + outward(line[1], line[0])?;
    let tail = line[n - 1] + outward(line[n - 2], line[n - 1])?;

    let mut extended = Vec::with_capacity(n + 2);
    extended.push(head);
    extended.extend_from_slice(line);
    extended.push(tail);
    Ok(extended)
}

/// The extended line followed by its reverse shifted by `offset`, closed.
fn offset_side(extended: &[Position], offset: Vec2) -> Ring {
    let shifted = extended.iter().rev().map(|&p| p + offset);
    Ring::new(extended.iter().copied().chain(shifted).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::merge;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    fn rectangle_a() -> Polygon {
        Polygon::from_coords(&[[9.5, 9.5], [10.5, 9.5], [10.5, 10.5], [9.5, 10.5]])
    }

    #[test]
    fn test_split_square_vertical() {
        let poly = rectangle_a();
        let pieces = split(&poly, &[p(10.0, 10.8), p(10.0, 9.2)]).unwrap();
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_relative_eq!(piece.area(), 0.5, epsilon = 1e-6);
            assert!(piece.exterior().is_closed());
        }
    }

    #[test]
    fn test_split_direction_independent() {
        let poly = rectangle_a();
        let down = split(&poly, &[p(10.0, 10.8), p(10.0, 9.2)]).unwrap();
        let up = split(&poly, &[p(10.0, 9.2), p(10.0, 10.8)]).unwrap();
        assert_eq!(down.len(), up.len());
    }

    #[test]
    fn test_split_conserves_area() {
        let hexagon = Polygon::from_coords(&[
            [0.0, 0.0],
            [2.0, -1.0],
            [4.0, 0.0],
            [4.0, 2.0],
            [2.0, 3.0],
            [0.0, 2.0],
        ]);
        let pieces = split(&hexagon, &[p(-1.0, 0.0), p(5.0, 2.0)]).unwrap();
        assert_eq!(pieces.len(), 2);

        let total: f64 = pieces.iter().map(Polygon::area).sum();
        assert_relative_eq!(total, hexagon.area(), epsilon = 1e-6);

        let rejoined = merge(&pieces).unwrap();
        assert_relative_eq!(rejoined.area(), hexagon.area(), epsilon = 1e-6);
    }

    #[test]
    fn test_split_line_outside_bbox() {
        let poly = rectangle_a();
        let result = split(&poly, &[p(20.0, 20.0), p(21.0, 25.0)]);
        assert_eq!(result, Err(SplitError::LineDoesNotCross));
    }

    #[test]
    fn test_split_line_ending_inside() {
        // Enters once, stops in the middle.
        let poly = rectangle_a();
        let result = split(&poly, &[p(10.0, 11.0), p(10.0, 10.0)]);
        assert_eq!(result, Err(SplitError::LineDoesNotCross));
    }

    #[test]
    fn test_split_too_short() {
        let poly = rectangle_a();
        assert_eq!(split(&poly, &[p(10.0, 10.0)]), Err(SplitError::CuttingLineTooShort));
    }

    #[test]
    fn test_split_degenerate_end_segment() {
        let poly = rectangle_a();
        let line = [p(10.0, 11.0), p(10.0, 9.0), p(10.0, 9.0)];
        assert_eq!(split(&poly, &line), Err(SplitError::DegenerateCuttingLine));
    }

    #[test]
    fn test_split_concave_into_three() {
        // A horizontal cut through both arms of a U.
        let u = Polygon::from_coords(&[
            [0.0, 0.0],
            [3.0, 0.0],
            [3.0, 3.0],
            [2.0, 3.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 3.0],
            [0.0, 3.0],
        ]);
        let pieces = split(&u, &[p(-1.0, 2.0), p(4.0, 2.0)]).unwrap();
        assert_eq!(pieces.len(), 3);
        let total: f64 = pieces.iter().map(Polygon::area).sum();
        assert_relative_eq!(total, u.area(), epsilon = 1e-6);
    }

    #[test]
    fn test_split_polyline() {
        let poly = Polygon::from_coords(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        let line = [p(1.0, -1.0), p(1.0, 2.0), p(3.0, 2.0), p(3.0, 5.0)];
        let pieces = split(&poly, &line).unwrap();
        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(Polygon::area).sum();
        assert_relative_eq!(total, 16.0, epsilon = 1e-6);
    }

    #[test]
    fn test_half_planes_are_closed_and_opposite() {
        let (a, b) = half_planes(&[p(0.0, 0.0), p(1.0, 0.0)], 10.0).unwrap();
        assert!(a.is_closed());
        assert!(b.is_closed());
        // Two line positions + two extensions, mirrored, plus closing position.
        assert_eq!(a.len(), 9);
        assert!(a.signed_area() * b.signed_area() < 0.0);
        assert!(a.contains(p(0.5, 5.0)) != b.contains(p(0.5, 5.0)));
    }
}
