//! Polygon and geometry records.

use super::ring::Ring;
use crate::bounds::Aabb;
use crate::error::RingError;
use crate::primitives::Position;
use num_traits::Float;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One outer ring plus zero or more holes.
///
/// Serializes as GeoJSON polygon coordinates: an array of rings, outer first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F = f64> {
    exterior: Ring<F>,
    holes: Vec<Ring<F>>,
}

impl<F: Float> Polygon<F> {
    #[inline]
    pub fn new(exterior: Ring<F>, holes: Vec<Ring<F>>) -> Self {
        Self { exterior, holes }
    }

    /// A polygon without holes.
    #[inline]
    pub fn from_exterior(exterior: Ring<F>) -> Self {
        Self::new(exterior, Vec::new())
    }

    /// A hole-free polygon from `[x, y]` pairs; the ring is closed if needed.
    pub fn from_coords(coords: &[[F; 2]]) -> Self {
        Self::from_exterior(Ring::from_coords(coords))
    }

    /// Builds a polygon from rings, outer first. `None` if `rings` is empty.
    pub fn from_rings(rings: Vec<Ring<F>>) -> Option<Self> {
        let mut iter = rings.into_iter();
        let exterior = iter.next()?;
        Some(Self::new(exterior, iter.collect()))
    }

    #[inline]
    pub fn exterior(&self) -> &Ring<F> {
        &self.exterior
    }

    #[inline]
    pub fn holes(&self) -> &[Ring<F>] {
        &self.holes
    }

    /// Outer ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring<F>> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }

    /// Applies `f` to every ring, keeping the outer/hole structure.
    pub fn map_rings(&self, mut f: impl FnMut(&Ring<F>) -> Ring<F>) -> Self {
        Self {
            exterior: f(&self.exterior),
            holes: self.holes.iter().map(f).collect(),
        }
    }

    /// Total number of positions across all rings, closing positions included.
    pub fn count_points(&self) -> usize {
        self.rings().map(Ring::len).sum()
    }

    /// Outer area minus hole area.
    pub fn area(&self) -> F {
        self.holes
            .iter()
            .fold(self.exterior.area(), |acc, hole| acc - hole.area())
    }

    #[inline]
    pub fn bounds(&self) -> Option<Aabb<F>> {
        self.exterior.bounds()
    }

    /// Checks every ring.
    pub fn validate(&self) -> Result<(), RingError> {
        self.rings().try_for_each(Ring::validate)
    }

    /// Inside the outer ring and outside every hole.
    pub fn contains(&self, p: Position<F>) -> bool {
        self.exterior.contains(p) && !self.holes.iter().any(|h| h.contains(p))
    }
}

impl<F: Serialize> Serialize for Polygon<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(std::iter::once(&self.exterior).chain(self.holes.iter()))
    }
}

impl<'de, F: Deserialize<'de>> Deserialize<'de> for Polygon<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut rings = Vec::<Ring<F>>::deserialize(deserializer)?.into_iter();
        let exterior = rings
            .next()
            .ok_or_else(|| D::Error::custom("polygon has no rings"))?;
        Ok(Self {
            exterior,
            holes: rings.collect(),
        })
    }
}

/// Polygonal geometry as found in imported feature collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry<F = f64> {
    Polygon(Polygon<F>),
    MultiPolygon(Vec<Polygon<F>>),
}

impl<F: Float> Geometry<F> {
    /// Every polygon in the geometry.
    pub fn polygons(&self) -> &[Polygon<F>] {
        match self {
            Geometry::Polygon(p) => std::slice::from_ref(p),
            Geometry::MultiPolygon(ps) => ps,
        }
    }

    /// Total number of positions across all rings.
    pub fn count_points(&self) -> usize {
        self.polygons().iter().map(Polygon::count_points).sum()
    }

    pub fn area(&self) -> F {
        self.polygons()
            .iter()
            .fold(F::zero(), |acc, p| acc + p.area())
    }
}

impl<F> From<Polygon<F>> for Geometry<F> {
    fn from(polygon: Polygon<F>) -> Self {
        Geometry::Polygon(polygon)
    }
}
