use crate::geom::{Family, Hexagon};
use crate::index::HexKey;
use geo_types::Polygon;
use rayon::prelude::*;

/// All hexagons generated for one radius over one extent.
///
/// Straight-family hexagons come first in row-major order, followed by the
/// shifted family in the same order. The position of a hexagon in this
/// collection is its local identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct HexSet {
    radius: f64,
    hexagons: Vec<Hexagon>,
}

impl HexSet {
    pub(crate) fn new(radius: f64, hexagons: Vec<Hexagon>) -> Self {
        Self { radius, hexagons }
    }

    /// Radius every hexagon in this set was generated with.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.hexagons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexagons.is_empty()
    }

    pub fn hexagons(&self) -> &[Hexagon] {
        &self.hexagons
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hexagon> {
        self.hexagons.iter()
    }

    /// Hexagons of a single family, in generation order.
    pub fn family(&self, family: Family) -> impl Iterator<Item = &Hexagon> {
        self.hexagons.iter().filter(move |h| h.family == family)
    }

    /// Hexagons paired with their composite key, local ids starting at zero.
    pub fn features(&self) -> impl Iterator<Item = (HexKey, &Hexagon)> {
        let radius = self.radius;
        self.hexagons
            .iter()
            .enumerate()
            .map(move |(i, hex)| (HexKey::new(radius, i as u64), hex))
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.hexagons.par_iter().map(|h| h.to_polygon()).collect()
    }

    /// Every hexagon with its x and y exchanged; order and families are kept.
    pub fn transposed(&self) -> Self {
        Self {
            radius: self.radius,
            hexagons: self.hexagons.iter().map(Hexagon::transposed).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HexSet {
    type Item = &'a Hexagon;
    type IntoIter = std::slice::Iter<'a, Hexagon>;

    fn into_iter(self) -> Self::IntoIter {
        self.hexagons.iter()
    }
}
