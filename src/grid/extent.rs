use crate::error::HexGridError;
use crate::geom::parse_geometry;
use geo::BoundingRect;
use geo_types::{Coord, Geometry, Point, Rect};
use serde::{Deserialize, Serialize};

/// Trait for types that can provide planar x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and
/// `geo_types::Coord<f64>`.
pub trait Coordinate {
    /// Returns the x-coordinate (easting).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (northing).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

/// Rectangular planar extent to tessellate, bottom-left to top-right.
///
/// Both corners must already be in one projected, metre-based system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Creates an extent, rejecting non-finite values and inverted axes.
    ///
    /// # Example
    /// ```
    /// use hexgrids_rs::Extent;
    ///
    /// assert!(Extent::new(0.0, 0.0, 100.0, 100.0).is_ok());
    /// assert!(Extent::new(10.0, 10.0, 5.0, 5.0).is_err());
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, HexGridError> {
        let extent = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        extent.validate()?;
        Ok(extent)
    }

    /// Builds an extent from two opposite corners given in any order.
    pub fn from_corners(a: &impl Coordinate, b: &impl Coordinate) -> Result<Self, HexGridError> {
        Self::new(
            a.x().min(b.x()),
            a.y().min(b.y()),
            a.x().max(b.x()),
            a.y().max(b.y()),
        )
    }

    pub fn from_rect(rect: &Rect<f64>) -> Result<Self, HexGridError> {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Bounding rectangle of any geometry.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Result<Self, HexGridError> {
        let rect = geometry.bounding_rect().ok_or_else(|| {
            HexGridError::InvalidInput("geometry is empty, no extent to derive".to_string())
        })?;
        Self::from_rect(&rect)
    }

    /// Bounding rectangle of a WKT or GeoJSON geometry string.
    pub fn from_geometry_str(s: &str) -> Result<Self, HexGridError> {
        Self::from_geometry(&parse_geometry(s)?)
    }

    /// Checks the bottom <= top ordering on both axes.
    ///
    /// Normalizing corner order is the caller's job; see [`Extent::from_corners`].
    pub fn validate(&self) -> Result<(), HexGridError> {
        let values = [self.min_x, self.min_y, self.max_x, self.max_y];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(HexGridError::InvalidInput(format!(
                "extent coordinates must be finite, got {:?}",
                values
            )));
        }
        if self.min_x > self.max_x {
            return Err(HexGridError::InvalidInput(format!(
                "bottom x ({}) is greater than top x ({})",
                self.min_x, self.max_x
            )));
        }
        if self.min_y > self.max_y {
            return Err(HexGridError::InvalidInput(format!(
                "bottom y ({}) is greater than top y ({})",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The same box with the x and y axes exchanged.
    pub fn transposed(&self) -> Self {
        Self {
            min_x: self.min_y,
            min_y: self.min_x,
            max_x: self.max_y,
            max_y: self.max_x,
        }
    }
}
