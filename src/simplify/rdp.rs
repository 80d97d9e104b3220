//! Ramer-Douglas-Peucker polyline simplification.
//!
//! The RDP algorithm repeatedly finds the point farthest from the chord
//! between the ends of a span and keeps it when it lies more than `epsilon`
//! from the chord's line. Spans are processed from an explicit stack of index
//! ranges over the input slice, so deep inputs cannot overflow the call stack
//! and no sub-slices are copied.
//!
//! Time complexity: O(n²) worst case, O(n log n) typical.

use crate::primitives::Position;
use crate::tolerance::perpendicular_distance;
use num_traits::Float;

/// Simplifies a polyline using the Ramer-Douglas-Peucker algorithm.
///
/// Returns a new vector containing only the points that remain after
/// simplification. The first and last points are always preserved.
///
/// # Arguments
///
/// * `points` - The input polyline as a slice of positions
/// * `epsilon` - Distance tolerance, measured perpendicular to the infinite
///   line through each chord. Points at or within this distance are removed.
///
/// # Example
///
/// ```
/// use regionedit::{Position, simplify::rdp};
///
/// let points = vec![
///     Position::new(0.0, 0.0),
///     Position::new(1.0, 0.1),  // Close to the line, will be removed
///     Position::new(2.0, 0.0),
///     Position::new(3.0, 2.0),  // Far from line, will be kept
///     Position::new(4.0, 0.0),
/// ];
///
/// let simplified = rdp(&points, 0.5);
/// assert!(simplified.len() < points.len());
/// ```
pub fn rdp<F: Float>(points: &[Position<F>], epsilon: F) -> Vec<Position<F>> {
    rdp_indices(points, epsilon)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Simplifies a polyline and returns the indices of retained points, in order.
///
/// Always includes index 0 and the last index if the input has >= 2 points.
/// When several points share the maximum distance from a chord, the first of
/// them is kept, so identical input always yields identical output.
pub fn rdp_indices<F: Float>(points: &[Position<F>], epsilon: F) -> Vec<usize> {
    let n = points.len();
    if n < 3 {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }

        let (chord_start, chord_end) = (points[start], points[end]);
        let mut max_dist = F::zero();
        let mut max_idx = start;
        for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = perpendicular_distance(p, chord_start, chord_end);
            // Strict comparison: the first maximum wins.
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }

        if max_dist > epsilon {
            keep[max_idx] = true;
            spans.push((max_idx, end));
            spans.push((start, max_idx));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| if k { Some(i) } else { None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[[f64; 2]]) -> Vec<Position> {
        coords.iter().map(|&c| Position::from(c)).collect()
    }

    #[test]
    fn test_rdp_empty() {
        let points: Vec<Position> = vec![];
        assert!(rdp(&points, 1.0).is_empty());
    }

    #[test]
    fn test_rdp_two_points() {
        let points = pts(&[[0.0, 0.0], [10.0, 10.0]]);
        assert_eq!(rdp(&points, 1.0).len(), 2);
    }

    #[test]
    fn test_rdp_straight_line() {
        let points = pts(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]);
        let result = rdp(&points, 0.1);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].x, 0.0);
        assert_eq!(result[1].x, 4.0);
    }

    #[test]
    fn test_rdp_l_shape() {
        let points = pts(&[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0]]);
        assert_eq!(rdp(&points, 0.1).len(), 3);
    }

    #[test]
    fn test_rdp_with_noise() {
        let points = pts(&[[0.0, 0.0], [1.0, 0.05], [2.0, -0.03], [3.0, 0.02], [4.0, 0.0]]);
        assert_eq!(rdp(&points, 0.1).len(), 2);
    }

    #[test]
    fn test_rdp_indices_keep_peak() {
        // Both flanks are collinear with their chords once the peak is kept.
        let points = pts(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 2.0], [5.0, 1.0], [6.0, 0.0]]);
        assert_eq!(rdp_indices(&points, 0.5), vec![0, 3, 6]);
    }

    #[test]
    fn test_rdp_indices_keep_bent_flank() {
        // (2, 0) is 10/sqrt(34) from the chord (0,0)-(3,5), and (4, 0) is
        // 5/sqrt(29) from (3,5)-(5,0), so both stay.
        let points = pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 5.0], [4.0, 0.0], [5.0, 0.0]]);
        assert_eq!(rdp_indices(&points, 0.5), vec![0, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rdp_distance_to_infinite_line() {
        // (10, 0.4) lies beyond the chord's end but only 0.4 from its line.
        let points = pts(&[[0.0, 0.0], [10.0, 0.4], [5.0, 0.0]]);
        assert_eq!(rdp_indices(&points, 0.5), vec![0, 2]);
    }

    #[test]
    fn test_rdp_tie_keeps_first() {
        let points = pts(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0], [3.0, 1.0], [4.0, 0.0]]);
        // Points 1 and 3 are equally far from the chord. Keeping 1 leaves 3
        // within tolerance of the new chord (1..4), so only 1 survives.
        assert_eq!(rdp_indices(&points, 0.9), vec![0, 1, 4]);
    }

    #[test]
    fn test_rdp_epsilon_boundary_removes() {
        // Exactly epsilon away is not "exceeding" epsilon.
        let points = pts(&[[0.0, 0.0], [1.0, 0.5], [2.0, 0.0]]);
        assert_eq!(rdp(&points, 0.5).len(), 2);
        assert_eq!(rdp(&points, 0.49).len(), 3);
    }

    #[test]
    fn test_rdp_zero_epsilon() {
        let points = pts(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);
        assert_eq!(rdp(&points, 0.0).len(), 3);
    }

    #[test]
    fn test_rdp_zigzag_keeps_every_point() {
        // Each span peels off one point, the deepest possible split chain.
        let points: Vec<Position> = (0..2_001)
            .map(|i| Position::new(i as f64, if i % 2 == 0 { 0.0 } else { 1.0 }))
            .collect();
        let result = rdp(&points, 0.1);
        assert_eq!(result.len(), points.len());
        assert_relative_eq!(result.last().unwrap().x, 2_000.0);
    }

    #[test]
    fn test_rdp_f32() {
        let points: Vec<Position<f32>> = vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(2.0, 0.0),
        ];
        assert_eq!(rdp(&points, 0.1).len(), 2);
    }
}
