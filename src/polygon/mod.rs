//! Polygon records and the geometry operations the editor builds on.
//!
//! - [`Ring`] and [`Polygon`]: closed rings, outer ring plus holes
//! - [`Geometry`]: a polygon or multi-polygon, GeoJSON shaped
//! - [`split`]: cut a polygon along a drawn line
//! - [`merge`]: union adjacent polygons into one
//!
//! # Example
//!
//! ```
//! use regionedit::polygon::{merge, split, Polygon};
//! use regionedit::Position;
//!
//! let square = Polygon::from_coords(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
//! let pieces = split(&square, &[Position::new(1.0, 3.0), Position::new(1.0, -1.0)]).unwrap();
//! assert_eq!(pieces.len(), 2);
//!
//! let rejoined = merge(&pieces).unwrap();
//! assert!((rejoined.area() - 4.0).abs() < 1e-6);
//! ```

mod boolean;
mod core;
mod merge;
mod ring;
mod split;

pub use boolean::{polygon_intersection, polygon_union};
pub use self::core::{Geometry, Polygon};
pub use merge::merge;
pub use ring::{close_ring, Ring};
pub use split::split;
