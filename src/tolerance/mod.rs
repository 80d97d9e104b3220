//! Tolerance-aware geometric predicates.
//!
//! Every function takes its tolerance explicitly.

mod predicates;

pub use predicates::{line_intersections, perpendicular_distance, segments_intersect, SegmentIntersection};
