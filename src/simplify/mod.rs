//! Polyline and polygon simplification.

mod geometry;
mod rdp;

pub use geometry::{count_points, simplify, simplify_polygon, simplify_ring};
pub use rdp::{rdp, rdp_indices};
