use crate::geom::dimensions::TileDims;
use geo_types::{Coord, LineString, Polygon};

/// Which of the two interleaved row/column families a hexagon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// The base grid, anchored at the lower-left corner of the expanded extent.
    Straight,
    /// The grid offset by half a period on both axes, filling the straight family's gaps.
    Shifted,
}

impl Family {
    /// Generation order: every straight hexagon precedes every shifted one.
    pub const ALL: [Family; 2] = [Family::Straight, Family::Shifted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Straight => "straight",
            Family::Shifted => "shifted",
        }
    }

    /// Offset `(dx, dy)` applied to this family's anchor positions.
    pub(crate) fn offset(&self, dims: &TileDims) -> (f64, f64) {
        match self {
            Family::Straight => (0.0, 0.0),
            Family::Shifted => (dims.col_step, dims.row_step),
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One closed hexagon ring produced by the tessellation engine.
///
/// The ring always holds seven points with the first repeated as the last:
/// lower-left, lower-right, right, upper-right, upper-left, left, lower-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Hexagon {
    /// Closed boundary, first and last point identical.
    pub ring: [Coord<f64>; 7],
    /// Family this hexagon was generated in.
    pub family: Family,
    /// Row index inside its family.
    pub row: usize,
    /// Column index inside its family.
    pub col: usize,
}

impl Hexagon {
    /// Pairs a horizontal and a vertical 7-value profile vertex by vertex.
    pub(crate) fn from_profiles(
        xs: &[f64; 7],
        ys: &[f64; 7],
        family: Family,
        row: usize,
        col: usize,
    ) -> Self {
        let ring = std::array::from_fn(|i| Coord { x: xs[i], y: ys[i] });
        Self {
            ring,
            family,
            row,
            col,
        }
    }

    /// The six distinct vertices, without the closing point.
    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.ring[..6]
    }

    /// Centre of the hexagon, halfway between the lower-left and upper-right vertices.
    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: (self.ring[0].x + self.ring[3].x) / 2.0,
            y: (self.ring[0].y + self.ring[3].y) / 2.0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.ring[0] == self.ring[6]
    }

    /// Same hexagon with x and y exchanged on every vertex.
    pub fn transposed(&self) -> Self {
        Self {
            ring: self.ring.map(|c| Coord { x: c.y, y: c.x }),
            ..self.clone()
        }
    }

    /// Converts the ring into a polygon for GIS operations.
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.ring.to_vec()), vec![])
    }
}

/// Horizontal profile of a hexagon whose lower-left vertex sits at `x`.
pub(crate) fn x_profile(x: f64, dims: &TileDims) -> [f64; 7] {
    let r = dims.radius;
    let m = dims.mid_len;
    [x, x + r, x + r + m, x + r, x, x - m, x]
}

/// Vertical profile of a hexagon whose bottom edge sits at `y`.
pub(crate) fn y_profile(y: f64, dims: &TileDims) -> [f64; 7] {
    let half = dims.height / 2.0;
    [y, y, y + half, y + dims.height, y + dims.height, y + half, y]
}
