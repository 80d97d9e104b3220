//! Map positions.

use super::Vec2;
use num_traits::Float;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Sub};

/// A position on the editing plane.
///
/// `x` is longitude and `y` is latitude, but all engine math treats them as
/// flat Euclidean coordinates. Serializes as a GeoJSON-style `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position<F = f64> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Position<F> {
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        (other - self).magnitude_squared()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Interpolates towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self) * t
    }

    /// Returns `true` if both coordinates are within `eps` of `other`.
    #[inline]
    pub fn approx_eq(self, other: Self, eps: F) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Float> From<[F; 2]> for Position<F> {
    #[inline]
    fn from([x, y]: [F; 2]) -> Self {
        Self { x, y }
    }
}

impl<F: Float> From<Position<F>> for [F; 2] {
    #[inline]
    fn from(p: Position<F>) -> Self {
        [p.x, p.y]
    }
}

impl<F: Float> From<(F, F)> for Position<F> {
    #[inline]
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

impl<F: Float> Sub for Position<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Add<Vec2<F>> for Position<F> {
    type Output = Self;

    #[inline]
    fn add(self, offset: Vec2<F>) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

impl<F: Float> Sub<Vec2<F>> for Position<F> {
    type Output = Self;

    #[inline]
    fn sub(self, offset: Vec2<F>) -> Self {
        Self::new(self.x - offset.x, self.y - offset.y)
    }
}

impl<F: Serialize> Serialize for Position<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.x, &self.y).serialize(serializer)
    }
}

impl<'de, F: Deserialize<'de>> Deserialize<'de> for Position<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(F, F)>::deserialize(deserializer)?;
        Ok(Self { x, y })
    }
}
