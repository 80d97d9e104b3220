//! Combining adjacent polygons into one.

use super::boolean::polygon_union;
use super::core::Polygon;
use crate::error::MergeError;
use tracing::debug;

/// Unions two or more polygons into a single polygon.
///
/// The inputs must overlap or share boundary so the union is one connected
/// area. Holes produced by the union are kept. Inputs that union into
/// several disconnected pieces fail with [`MergeError::NotAdjacent`].
///
/// # Example
///
/// ```
/// use regionedit::polygon::{merge, Polygon};
///
/// let left = Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let right = Polygon::from_coords(&[[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]]);
///
/// let merged = merge(&[left, right]).unwrap();
/// assert!((merged.area() - 2.0).abs() < 1e-6);
/// ```
pub fn merge(polygons: &[Polygon]) -> Result<Polygon, MergeError> {
    if polygons.len() < 2 {
        return Err(MergeError::InsufficientInputs);
    }
    for (i, polygon) in polygons.iter().enumerate() {
        polygon
            .validate()
            .map_err(|e| MergeError::UnionFailed(format!("polygon {i}: {e}")))?;
    }

    let mut union = polygon_union(polygons);
    match union.len() {
        0 => Err(MergeError::UnionFailed("union produced no polygon".to_string())),
        1 => Ok(union.remove(0)),
        n => {
            debug!(components = n, "merge inputs are not adjacent");
            Err(MergeError::NotAdjacent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Ring;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::from_coords(&[[x, y], [x + size, y], [x + size, y + size], [x, y + size]])
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge(&[square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)]).unwrap();
        assert_relative_eq!(merged.area(), 7.0, epsilon = 1e-6);
        assert!(merged.area() < 8.0);
        assert!(merged.exterior().is_closed());
    }

    #[test]
    fn test_merge_shared_edge() {
        let merged = merge(&[square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)]).unwrap();
        assert_relative_eq!(merged.area(), 2.0, epsilon = 1e-6);
        assert!(merged.holes().is_empty());
    }

    #[test]
    fn test_merge_disjoint() {
        let result = merge(&[square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)]);
        assert_eq!(result, Err(MergeError::NotAdjacent));
    }

    #[test]
    fn test_merge_single_input() {
        assert_eq!(merge(&[square(0.0, 0.0, 1.0)]), Err(MergeError::InsufficientInputs));
        assert_eq!(merge(&[]), Err(MergeError::InsufficientInputs));
    }

    #[test]
    fn test_merge_three_way() {
        let merged = merge(&[
            square(0.0, 0.0, 1.0),
            square(1.0, 0.0, 1.0),
            square(2.0, 0.0, 1.0),
        ])
        .unwrap();
        assert_relative_eq!(merged.area(), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_merge_keeps_hole() {
        // Four bars framing a 1x1 gap.
        let bars = [
            Polygon::from_coords(&[[0.0, 0.0], [3.0, 0.0], [3.0, 1.0], [0.0, 1.0]]),
            Polygon::from_coords(&[[0.0, 2.0], [3.0, 2.0], [3.0, 3.0], [0.0, 3.0]]),
            Polygon::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 3.0], [0.0, 3.0]]),
            Polygon::from_coords(&[[2.0, 0.0], [3.0, 0.0], [3.0, 3.0], [2.0, 3.0]]),
        ];
        let merged = merge(&bars).unwrap();
        assert_eq!(merged.holes().len(), 1);
        assert_relative_eq!(merged.area(), 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_merge_rejects_degenerate_input() {
        let flat = Polygon::from_exterior(Ring::from_coords(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]));
        let result = merge(&[square(0.0, 0.0, 1.0), flat]);
        assert!(matches!(result, Err(MergeError::UnionFailed(msg)) if msg.starts_with("polygon 1")));
    }
}
