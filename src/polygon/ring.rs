//! Closed rings of positions.

use crate::bounds::Aabb;
use crate::error::RingError;
use crate::primitives::Position;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A closed loop of positions bounding a polygon or a hole.
///
/// The first and last positions are identical. Rings built through
/// [`Ring::new`] or [`close_ring`] are always closed; rings that arrive through
/// deserialization should be checked with [`Ring::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring<F = f64> {
    positions: Vec<Position<F>>,
}

/// Appends the first position if the sequence is not already closed.
pub fn close_ring<F: Float>(mut positions: Vec<Position<F>>) -> Ring<F> {
    if let (Some(&first), Some(&last)) = (positions.first(), positions.last()) {
        if first != last {
            positions.push(first);
        }
    }
    Ring { positions }
}

impl<F: Float> Ring<F> {
    /// Builds a ring, closing it if necessary.
    #[inline]
    pub fn new(positions: Vec<Position<F>>) -> Self {
        close_ring(positions)
    }

    /// Builds a ring from `[x, y]` pairs, closing it if necessary.
    pub fn from_coords(coords: &[[F; 2]]) -> Self {
        close_ring(coords.iter().map(|&c| Position::from(c)).collect())
    }

    /// All positions, including the closing one.
    #[inline]
    pub fn positions(&self) -> &[Position<F>] {
        &self.positions
    }

    /// Positions without the duplicated closing position.
    pub fn open(&self) -> &[Position<F>] {
        if self.is_closed() {
            &self.positions[..self.positions.len() - 1]
        } else {
            &self.positions
        }
    }

    /// Number of positions, including the closing one.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.positions.first(), self.positions.last()) {
            (Some(first), Some(last)) => self.positions.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Number of distinct positions (exact comparison).
    pub fn distinct_count(&self) -> usize {
        let mut sorted: Vec<Position<F>> = self.open().to_vec();
        sorted.sort_by(|a, b| {
            a.x.partial_cmp(&b.x)
                .unwrap_or(Ordering::Equal)
                .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
        });
        sorted.dedup();
        sorted.len()
    }

    /// Checks that the ring can bound a polygon.
    pub fn validate(&self) -> Result<(), RingError> {
        if self.positions.iter().any(|p| !p.is_finite()) {
            return Err(RingError::NonFinite);
        }
        if self.positions.len() < 4 {
            return Err(RingError::TooFewPoints {
                len: self.positions.len(),
            });
        }
        if !self.is_closed() {
            return Err(RingError::NotClosed);
        }
        let distinct = self.distinct_count();
        if distinct < 3 {
            return Err(RingError::TooFewDistinct { distinct });
        }
        Ok(())
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.validate().is_err()
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> F {
        let pts = self.open();
        if pts.len() < 3 {
            return F::zero();
        }
        let mut twice = F::zero();
        for (i, a) in pts.iter().enumerate() {
            let b = pts[(i + 1) % pts.len()];
            twice = twice + (a.x * b.y - b.x * a.y);
        }
        twice / (F::one() + F::one())
    }

    #[inline]
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    pub fn bounds(&self) -> Option<Aabb<F>> {
        Aabb::from_positions(self.positions.iter().copied())
    }

    /// Ring traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut positions = self.positions.clone();
        positions.reverse();
        Self { positions }
    }

    /// Even-odd point-in-ring test. Points on the boundary may go either way.
    pub fn contains(&self, p: Position<F>) -> bool {
        let pts = self.open();
        if pts.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (vi, vj) = (pts[i], pts[j]);
            if (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
