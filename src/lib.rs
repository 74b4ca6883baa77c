//! # hexgrids-rs
//!
//! Superimposed, tessellating hexagon grids at several sizes over one planar
//! extent, for use as multi-scale spatial aggregation layers.
//!
//! Coordinates and radii share one projected, metre-based unit. Reprojecting
//! geographic corners (e.g. to UTM) happens before anything here is called.
//!
//! ### 1. `tessellate` - One Radius
//!
//! ```
//! use hexgrids_rs::tessellate;
//!
//! # fn main() -> Result<(), hexgrids_rs::HexGridError> {
//! let set = tessellate(0.0, 0.0, 100.0, 100.0, 50.0)?;
//! for hex in set.iter() {
//!     let polygon = hex.to_polygon();
//!     assert_eq!(polygon.exterior().coords().count(), 7);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `build_batch` - Several Radii
//!
//! ```
//! use hexgrids_rs::{Extent, build_batch};
//!
//! # fn main() -> Result<(), hexgrids_rs::HexGridError> {
//! let extent = Extent::from_corners(&(502_100.0, 6_953_200.0), &(501_100.0, 6_952_200.0))?;
//! let batch = build_batch(&extent, &[20.0, 50.0, 100.0, 200.0])?;
//! for (key, hex) in batch.features() {
//!     println!("{} -> {:?}", key, hex.center());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `GridJob` - Generate and Write
//!
//! ```no_run
//! use hexgrids_rs::{Extent, GridJob};
//!
//! let extent = Extent::new(483_700.0, 6_953_200.0, 502_100.0, 6_972_300.0).unwrap();
//! GridJob::new(extent, vec![20.0, 50.0, 100.0, 200.0], "Brisbane.parquet")
//!     .epsg(32756)
//!     .run()
//!     .unwrap();
//! ```
//!
//! Large extents at small radii grow quadratically in hexagon count. Each
//! tessellation is capped (see [`DEFAULT_MAX_HEXAGONS`]) and fails with
//! [`HexGridError::CapacityExceeded`] rather than exhausting memory.

pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;

pub use config::{GridJob, JobSummary, OutputFormat};
pub use error::HexGridError;
pub use geom::{Family, Hexagon, TileDims, parse_geometry};
pub use grid::{
    Coordinate, DEFAULT_MAX_HEXAGONS, Extent, GridBatch, HexSet, build_batch, build_batch_par,
    build_batch_with_limit, build_pointy_batch, tessellate, tessellate_extent,
};
pub use index::{HexKey, KEY_VERSION};
pub use io::{
    FeatureSource, GeometryFormat, HexFeaturesToArrow, HexFeaturesToCsv, HexFeaturesToGeoJson,
    HexFeaturesToGeoParquet, write_geoparquet,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Intersects};
    use geo_types::{Rect, coord};

    #[test]
    fn test_end_to_end_workflow() -> Result<(), HexGridError> {
        let extent = Extent::from_corners(&(153.0e3, 6.96e6), &(152.0e3, 6.95e6))?;
        let sizes = [200.0, 500.0, 1000.0];
        let batch = build_batch(&extent, &sizes)?;

        assert_eq!(batch.sizes(), &sizes);
        assert_eq!(batch.sets().len(), sizes.len());

        for set in batch.sets() {
            for hex in set {
                assert!(hex.is_closed());
                assert_eq!(hex.ring.len(), 7);
            }
        }

        let (key, _) = batch
            .features()
            .nth(batch.sets()[0].len())
            .ok_or_else(|| HexGridError::InvalidInput("missing feature".to_string()))?;
        assert_eq!(key, HexKey::new(500.0, 0));
        assert_eq!(HexKey::decode(&key.encode())?, key);
        Ok(())
    }

    #[test]
    fn test_radius_50_covers_square() -> Result<(), HexGridError> {
        let set = tessellate(0.0, 0.0, 100.0, 100.0, 50.0)?;
        let polygons = set.to_polygons();

        for i in 1..20 {
            for j in 1..20 {
                let pt = coord! { x: i as f64 * 5.0, y: j as f64 * 5.0 };
                assert!(polygons.iter().any(|p| p.intersects(&pt)));
            }
        }

        for hex in set.iter() {
            let c = hex.center();
            for v in hex.vertices() {
                let d = ((v.x - c.x).powi(2) + (v.y - c.y).powi(2)).sqrt();
                assert!((d - 50.0).abs() < 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_area_matches_tile_dims() -> Result<(), HexGridError> {
        let dims = TileDims::from_radius(75.0)?;
        let set = tessellate(0.0, 0.0, 500.0, 500.0, 75.0)?;

        for hex in set.iter() {
            assert!((hex.to_polygon().unsigned_area() - dims.area).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_nested_sizes_reach_past_extent() -> Result<(), HexGridError> {
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1000.0, y: 800.0 });
        let extent = Extent::from_rect(&rect)?;
        let batch = build_batch(&extent, &[20.0, 50.0, 100.0, 200.0])?;

        // Every size group reaches into each corner of the extent.
        for set in batch.sets() {
            let polygons = set.to_polygons();
            for corner in [
                coord! { x: 0.01, y: 0.01 },
                coord! { x: 999.99, y: 0.01 },
                coord! { x: 0.01, y: 799.99 },
                coord! { x: 999.99, y: 799.99 },
            ] {
                assert!(polygons.iter().any(|p| p.intersects(&corner)));
            }
        }
        Ok(())
    }

    #[test]
    fn test_extent_from_geometry_string() -> Result<(), HexGridError> {
        let extent =
            Extent::from_geometry_str("POLYGON((10 20, 310 20, 310 220, 10 220, 10 20))")?;
        let set = tessellate_extent(&extent, 40.0, DEFAULT_MAX_HEXAGONS)?;
        assert!(!set.is_empty());
        assert_eq!(
            set.family(Family::Straight).count(),
            set.family(Family::Shifted).count()
        );
        Ok(())
    }
}
