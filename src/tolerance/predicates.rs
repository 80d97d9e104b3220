//! Distance and intersection predicates with explicit tolerance.

use crate::primitives::{Position, Segment};
use num_traits::Float;

/// Shortest distance from `point` to the infinite line through `line_start`
/// and `line_end`.
///
/// When the two line endpoints coincide this is the plain Euclidean distance
/// to `line_start`.
#[inline]
pub fn perpendicular_distance<F: Float>(
    point: Position<F>,
    line_start: Position<F>,
    line_end: Position<F>,
) -> F {
    let d = line_end - line_start;
    let len_sq = d.magnitude_squared();
    if len_sq == F::zero() {
        return point.distance(line_start);
    }
    d.cross(point - line_start).abs() / len_sq.sqrt()
}

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// The segments do not meet.
    None,
    /// The segments cross or touch at one point.
    Point {
        point: Position<F>,
        /// Parameter along the first segment.
        t1: F,
        /// Parameter along the second segment.
        t2: F,
    },
    /// The segments are collinear and share a stretch.
    Overlapping {
        start: Position<F>,
        end: Position<F>,
    },
}

/// Intersects two segments.
///
/// `eps` is a parametric tolerance: crossings up to `eps` beyond either
/// segment's endpoints still count, which keeps a cut through a ring vertex
/// from slipping between its two edges. Parallelism is judged on the sine of
/// the angle between the segments, so the test does not depend on scale.
pub fn segments_intersect<F: Float>(
    s1: Segment<F>,
    s2: Segment<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let len1 = d1.magnitude();
    let len2 = d2.magnitude();

    if len1 == F::zero() || len2 == F::zero() {
        return degenerate_intersection(s1, s2, eps);
    }

    let cross = d1.cross(d2);
    let offset = s2.start - s1.start;

    if cross.abs() <= eps * len1 * len2 {
        // Parallel: only collinear overlap can meet.
        if offset.cross(d1).abs() > eps * len1 * len1.max(len2) {
            return SegmentIntersection::None;
        }
        let a = s1.project(s2.start);
        let b = s1.project(s2.end);
        let lo = a.min(b).max(F::zero());
        let hi = a.max(b).min(F::one());
        if lo > hi + eps {
            return SegmentIntersection::None;
        }
        if hi - lo <= eps {
            let point = s1.point_at(lo);
            return SegmentIntersection::Point {
                point,
                t1: lo,
                t2: s2.project(point),
            };
        }
        return SegmentIntersection::Overlapping {
            start: s1.point_at(lo),
            end: s1.point_at(hi),
        };
    }

    let t1 = offset.cross(d2) / cross;
    let t2 = offset.cross(d1) / cross;
    let lo = -eps;
    let hi = F::one() + eps;

    if t1 >= lo && t1 <= hi && t2 >= lo && t2 <= hi {
        let t1 = t1.max(F::zero()).min(F::one());
        SegmentIntersection::Point {
            point: s1.point_at(t1),
            t1,
            t2: t2.max(F::zero()).min(F::one()),
        }
    } else {
        SegmentIntersection::None
    }
}

fn degenerate_intersection<F: Float>(
    s1: Segment<F>,
    s2: Segment<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let (point, other) = if s1.length() == F::zero() {
        (s1.start, s2)
    } else {
        (s2.start, s1)
    };
    let t = other.project(point);
    if t < -eps || t > F::one() + eps {
        return SegmentIntersection::None;
    }
    let scale = other.length().max(F::one());
    if perpendicular_distance(point, other.start, other.end) > eps * scale {
        return SegmentIntersection::None;
    }
    SegmentIntersection::Point {
        point,
        t1: F::zero(),
        t2: F::zero(),
    }
}

/// All points where polyline `a` crosses or touches polyline `b`.
///
/// Collinear overlaps contribute nothing (a line sliding along an edge does
/// not cross it). Points closer than `eps` to an already reported point are
/// merged, so a crossing exactly through a vertex is reported once. Points
/// are reported in order along `b`'s segments.
pub fn line_intersections<F: Float>(a: &[Position<F>], b: &[Position<F>], eps: F) -> Vec<Position<F>> {
    let mut found: Vec<Position<F>> = Vec::new();

    for wb in b.windows(2) {
        let sb = Segment::new(wb[0], wb[1]);
        for wa in a.windows(2) {
            let sa = Segment::new(wa[0], wa[1]);
            if !sb.bounds_overlap(sa, eps) {
                continue;
            }
            if let SegmentIntersection::Point { point, .. } = segments_intersect(sb, sa, eps) {
                if !found.iter().any(|p| p.approx_eq(point, eps)) {
                    found.push(point);
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_perpendicular_distance() {
        let d = perpendicular_distance(p(5.0, 3.0), p(0.0, 0.0), p(10.0, 0.0));
        assert_relative_eq!(d, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_uses_infinite_line() {
        // Beyond the end of the chord the distance is still to the line.
        let d = perpendicular_distance(p(20.0, 2.0), p(0.0, 0.0), p(10.0, 0.0));
        assert_relative_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_coincident_endpoints() {
        let d = perpendicular_distance(p(3.0, 4.0), p(0.0, 0.0), p(0.0, 0.0));
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segments_cross() {
        let s1 = Segment::new(p(0.0, 0.0), p(2.0, 2.0));
        let s2 = Segment::new(p(0.0, 2.0), p(2.0, 0.0));
        match segments_intersect(s1, s2, 1e-12) {
            SegmentIntersection::Point { point, t1, t2 } => {
                assert_relative_eq!(point.x, 1.0, epsilon = 1e-12);
                assert_relative_eq!(point.y, 1.0, epsilon = 1e-12);
                assert_relative_eq!(t1, 0.5, epsilon = 1e-12);
                assert_relative_eq!(t2, 0.5, epsilon = 1e-12);
            }
            other => panic!("expected a point, got {other:?}"),
        }
    }

    #[test]
    fn test_segments_miss() {
        let s1 = Segment::new(p(0.0, 0.0), p(1.0, 0.0));
        let s2 = Segment::new(p(2.0, -1.0), p(2.0, 1.0));
        assert_eq!(segments_intersect(s1, s2, 1e-12), SegmentIntersection::None);
    }

    #[test]
    fn test_segments_parallel() {
        let s1 = Segment::new(p(0.0, 0.0), p(1.0, 0.0));
        let s2 = Segment::new(p(0.0, 1.0), p(1.0, 1.0));
        assert_eq!(segments_intersect(s1, s2, 1e-12), SegmentIntersection::None);
    }

    #[test]
    fn test_segments_collinear_overlap() {
        let s1 = Segment::new(p(0.0, 0.0), p(2.0, 0.0));
        let s2 = Segment::new(p(1.0, 0.0), p(3.0, 0.0));
        match segments_intersect(s1, s2, 1e-12) {
            SegmentIntersection::Overlapping { start, end } => {
                assert_relative_eq!(start.x, 1.0);
                assert_relative_eq!(end.x, 2.0);
            }
            other => panic!("expected overlap, got {other:?}"),
        }
    }

    #[test]
    fn test_line_intersections_through_square() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        let cut = [p(0.5, -1.0), p(0.5, 2.0)];
        let hits = line_intersections(&square, &cut, 1e-12);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(hits[1].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_line_intersections_through_vertex_reported_once() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        let diagonal = [p(-1.0, -1.0), p(2.0, 2.0)];
        let hits = line_intersections(&square, &diagonal, 1e-12);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_line_intersections_none() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        let outside = [p(5.0, 5.0), p(6.0, 7.0)];
        assert!(line_intersections(&square, &outside, 1e-12).is_empty());
    }

    #[test]
    fn test_line_intersections_ignores_collinear_edges() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        let along_bottom = [p(0.2, 0.0), p(0.8, 0.0)];
        assert!(line_intersections(&square, &along_bottom, 1e-12).is_empty());
    }
}
