//! Planar primitives shared by the geometry engine.

mod position;
mod segment;
mod vec2;

pub use position::Position;
pub use segment::Segment;
pub use vec2::Vec2;
