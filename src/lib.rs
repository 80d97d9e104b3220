//! regionedit - Polygon geometry engine and editing state machine
//!
//! Splits polygons along drawn lines, merges adjacent polygons, simplifies
//! rings with Ramer-Douglas-Peucker, and tracks an editing session with a
//! single active mode and snapshot undo/redo. Coordinates are treated as a
//! flat Euclidean plane, which is accurate enough at city and region scale.
//!
//! The crate renders nothing and reads no files except its configuration.
//! Callers hand in geometry and feature records and read results back.

pub mod bounds;
pub mod config;
pub mod editor;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod simplify;
pub mod tolerance;

pub use bounds::Aabb;
pub use config::{EditorConfig, SimplifyConfig};
pub use editor::{Editor, FeatureId, GroupId, Mode, PolygonFeature, PolygonGroup, PolygonStyle};
pub use error::{ConfigError, EditorError, MergeError, RingError, SplitError};
pub use polygon::{close_ring, merge, split, Geometry, Polygon, Ring};
pub use primitives::{Position, Segment, Vec2};
pub use simplify::{count_points, simplify};
pub use tolerance::{line_intersections, perpendicular_distance, segments_intersect, SegmentIntersection};
