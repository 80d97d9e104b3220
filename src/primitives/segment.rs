//! Straight edges between two positions.

use super::{Position, Vec2};
use num_traits::Float;

/// A straight edge of a ring or cutting line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<F = f64> {
    pub start: Position<F>,
    pub end: Position<F>,
}

impl<F: Float> Segment<F> {
    #[inline]
    pub fn new(start: Position<F>, end: Position<F>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Point at parameter `t`; values outside `[0, 1]` extrapolate.
    #[inline]
    pub fn point_at(self, t: F) -> Position<F> {
        self.start.lerp(self.end, t)
    }

    /// Parameter of the orthogonal projection of `p` onto the segment's line.
    ///
    /// Returns zero for a degenerate segment.
    pub fn project(self, p: Position<F>) -> F {
        let d = self.direction();
        let len_sq = d.magnitude_squared();
        if len_sq == F::zero() {
            return F::zero();
        }
        (p - self.start).dot(d) / len_sq
    }

    /// Returns `true` if the axis-aligned boxes of the two segments overlap
    /// (with `eps` slack). Cheap pre-check before solving for a crossing.
    #[inline]
    pub fn bounds_overlap(self, other: Self, eps: F) -> bool {
        let (ax0, ax1) = min_max(self.start.x, self.end.x);
        let (ay0, ay1) = min_max(self.start.y, self.end.y);
        let (bx0, bx1) = min_max(other.start.x, other.end.x);
        let (by0, by1) = min_max(other.start.y, other.end.y);
        ax0 <= bx1 + eps && bx0 <= ax1 + eps && ay0 <= by1 + eps && by0 <= ay1 + eps
    }
}

#[inline]
fn min_max<F: Float>(a: F, b: F) -> (F, F) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
