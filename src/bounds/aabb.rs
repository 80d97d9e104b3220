//! Axis-aligned bounding boxes.

use crate::primitives::Position;
use num_traits::Float;

/// Axis-aligned bounding box of a ring, polygon or polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<F = f64> {
    pub min: Position<F>,
    pub max: Position<F>,
}

impl<F: Float> Aabb<F> {
    #[inline]
    pub fn from_position(p: Position<F>) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box enclosing every position; `None` for an empty iterator.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position<F>>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_position(first), Self::expand_to_include))
    }

    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// The larger of width and height.
    #[inline]
    pub fn max_extent(self) -> F {
        self.width().max(self.height())
    }

    #[inline]
    pub fn expand_to_include(self, p: Position<F>) -> Self {
        Self {
            min: Position::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Position::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }
}
