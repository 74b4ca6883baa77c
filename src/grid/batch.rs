use crate::error::HexGridError;
use crate::geom::Hexagon;
use crate::grid::extent::Extent;
use crate::grid::hex_set::HexSet;
use crate::grid::tessellate::{DEFAULT_MAX_HEXAGONS, tessellate_extent};
use crate::index::HexKey;
use log::debug;
use rayon::prelude::*;

/// Hexagon sets for every requested radius, in request order.
///
/// `sets()[i]` was generated with `sizes()[i]`. Both lists always have the
/// same length; a batch only comes out of the builder functions below.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridBatch {
    sets: Vec<HexSet>,
    sizes: Vec<f64>,
}

impl GridBatch {
    pub fn sets(&self) -> &[HexSet] {
        &self.sets
    }

    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Number of size groups.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Total hexagon count across all size groups.
    pub fn hexagon_count(&self) -> usize {
        self.sets.iter().map(HexSet::len).sum()
    }

    /// Walks every hexagon with its composite key.
    ///
    /// Sets are visited in request order and hexagons in engine order, so the
    /// local id is the hexagon's index within its set.
    pub fn features(&self) -> impl Iterator<Item = (HexKey, &Hexagon)> {
        self.sets.iter().flat_map(|set| set.features())
    }

    /// Every set with x and y exchanged, sizes and order unchanged.
    pub fn transposed(&self) -> Self {
        Self {
            sets: self.sets.iter().map(HexSet::transposed).collect(),
            sizes: self.sizes.clone(),
        }
    }

    fn push(&mut self, set: HexSet) {
        self.sizes.push(set.radius());
        self.sets.push(set);
    }
}

/// Builds one hexagon set per radius over a fixed extent.
///
/// Radii are honoured as given: duplicates produce duplicate sets and no
/// sorting happens. The first failing radius aborts the whole batch.
///
/// # Example
/// ```
/// use hexgrids_rs::{Extent, build_batch};
///
/// # fn main() -> Result<(), hexgrids_rs::HexGridError> {
/// let extent = Extent::new(0.0, 0.0, 1000.0, 1000.0)?;
/// let batch = build_batch(&extent, &[20.0, 50.0, 100.0, 200.0])?;
/// assert_eq!(batch.sizes(), &[20.0, 50.0, 100.0, 200.0]);
/// # Ok(())
/// # }
/// ```
pub fn build_batch(extent: &Extent, radii: &[f64]) -> Result<GridBatch, HexGridError> {
    build_batch_with_limit(extent, radii, DEFAULT_MAX_HEXAGONS)
}

/// [`build_batch`] with an explicit per-radius hexagon limit.
pub fn build_batch_with_limit(
    extent: &Extent,
    radii: &[f64],
    max_hexagons: usize,
) -> Result<GridBatch, HexGridError> {
    let mut batch = GridBatch::default();
    for &radius in radii {
        let set = tessellate_for(extent, radius, max_hexagons)?;
        debug!("radius {} done, {} hexagons", radius, set.len());
        batch.push(set);
    }
    Ok(batch)
}

/// Parallel [`build_batch_with_limit`].
///
/// Output order matches `radii`. When several radii fail, the error reported
/// is the one for the earliest radius in input order.
pub fn build_batch_par(
    extent: &Extent,
    radii: &[f64],
    max_hexagons: usize,
) -> Result<GridBatch, HexGridError> {
    let results: Vec<Result<HexSet, HexGridError>> = radii
        .par_iter()
        .map(|&radius| tessellate_for(extent, radius, max_hexagons))
        .collect();

    let mut batch = GridBatch::default();
    for result in results {
        batch.push(result?);
    }
    Ok(batch)
}

/// Builds a batch whose hexagons point north and south on the map.
///
/// The engine lays its side vertices along its first axis, so the extent is
/// handed over northing first and every ring is swapped back to
/// (easting, northing) afterwards. Each hexagon then spans `2 * radius` in y
/// and `sqrt(3) * radius` in x.
pub fn build_pointy_batch(
    extent: &Extent,
    radii: &[f64],
    max_hexagons: usize,
    parallel: bool,
) -> Result<GridBatch, HexGridError> {
    let swapped = extent.transposed();
    let batch = if parallel {
        build_batch_par(&swapped, radii, max_hexagons)?
    } else {
        build_batch_with_limit(&swapped, radii, max_hexagons)?
    };
    Ok(batch.transposed())
}

fn tessellate_for(extent: &Extent, radius: f64, max_hexagons: usize) -> Result<HexSet, HexGridError> {
    tessellate_extent(extent, radius, max_hexagons).map_err(|e| HexGridError::ForRadius {
        radius,
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellate;

    fn extent() -> Result<Extent, HexGridError> {
        Extent::new(0.0, 0.0, 1000.0, 1000.0)
    }

    #[test]
    fn test_batch_ordering() -> Result<(), HexGridError> {
        let batch = build_batch(&extent()?, &[20.0, 50.0, 100.0, 200.0])?;

        assert_eq!(batch.sizes(), &[20.0, 50.0, 100.0, 200.0]);
        assert_eq!(batch.len(), 4);
        for (set, &size) in batch.sets().iter().zip(batch.sizes()) {
            assert_eq!(set.radius(), size);
        }
        Ok(())
    }

    #[test]
    fn test_sets_match_direct_calls() -> Result<(), HexGridError> {
        let batch = build_batch(&extent()?, &[100.0, 50.0])?;
        assert_eq!(batch.sets()[0], tessellate(0.0, 0.0, 1000.0, 1000.0, 100.0)?);
        assert_eq!(batch.sets()[1], tessellate(0.0, 0.0, 1000.0, 1000.0, 50.0)?);
        Ok(())
    }

    #[test]
    fn test_duplicates_and_order_honoured() -> Result<(), HexGridError> {
        let batch = build_batch(&extent()?, &[200.0, 50.0, 200.0])?;

        assert_eq!(batch.sizes(), &[200.0, 50.0, 200.0]);
        assert_eq!(batch.sets()[0], batch.sets()[2]);
        assert!(batch.sets()[1].len() > batch.sets()[0].len());
        Ok(())
    }

    #[test]
    fn test_empty_radii() -> Result<(), HexGridError> {
        let batch = build_batch(&extent()?, &[])?;
        assert!(batch.is_empty());
        assert_eq!(batch.hexagon_count(), 0);
        Ok(())
    }

    #[test]
    fn test_failure_names_radius() -> Result<(), HexGridError> {
        let result = build_batch(&extent()?, &[50.0, 0.0, -1.0]);

        match result {
            Err(HexGridError::ForRadius { radius, source }) => {
                assert_eq!(radius, 0.0);
                assert!(matches!(*source, HexGridError::InvalidInput(_)));
            }
            other => panic!("Expected ForRadius, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_capacity_failure_aborts_batch() -> Result<(), HexGridError> {
        let result = build_batch_with_limit(&extent()?, &[500.0, 1.0], 100);
        let err = result.err();

        assert!(matches!(
            err.as_ref().map(HexGridError::root),
            Some(HexGridError::CapacityExceeded { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_parallel_matches_sequential() -> Result<(), HexGridError> {
        let radii = [20.0, 200.0, 50.0, 100.0];
        let seq = build_batch(&extent()?, &radii)?;
        let par = build_batch_par(&extent()?, &radii, DEFAULT_MAX_HEXAGONS)?;
        assert_eq!(seq, par);
        Ok(())
    }

    #[test]
    fn test_parallel_reports_earliest_failure() -> Result<(), HexGridError> {
        let result = build_batch_par(&extent()?, &[50.0, -2.0, 0.0], DEFAULT_MAX_HEXAGONS);
        assert!(matches!(
            result,
            Err(HexGridError::ForRadius { radius, .. }) if radius == -2.0
        ));
        Ok(())
    }

    fn spans(hex: &Hexagon) -> (f64, f64) {
        let xs = hex.vertices().iter().map(|c| c.x);
        let ys = hex.vertices().iter().map(|c| c.y);
        let span = |v: Vec<f64>| {
            v.iter().cloned().fold(f64::MIN, f64::max) - v.iter().cloned().fold(f64::MAX, f64::min)
        };
        (span(xs.collect()), span(ys.collect()))
    }

    #[test]
    fn test_pointy_batch_orientation() -> Result<(), HexGridError> {
        let extent = Extent::new(0.0, 0.0, 1000.0, 600.0)?;
        let batch = build_pointy_batch(&extent, &[50.0, 100.0], DEFAULT_MAX_HEXAGONS, false)?;

        assert_eq!(batch.sizes(), &[50.0, 100.0]);
        for set in batch.sets() {
            for hex in set {
                let (x_span, y_span) = spans(hex);
                assert!((y_span - 2.0 * set.radius()).abs() < 1e-9);
                assert!((x_span - 3.0_f64.sqrt() * set.radius()).abs() < 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_pointy_batch_covers_extent() -> Result<(), HexGridError> {
        use geo::Intersects;
        use geo_types::coord;

        let extent = Extent::new(100.0, 2000.0, 900.0, 2300.0)?;
        let batch = build_pointy_batch(&extent, &[40.0], DEFAULT_MAX_HEXAGONS, true)?;
        let polygons = batch.sets()[0].to_polygons();

        for i in 1..30 {
            for j in 1..30 {
                let pt = coord! {
                    x: 100.0 + 800.0 * i as f64 / 30.0,
                    y: 2000.0 + 300.0 * j as f64 / 30.0,
                };
                assert!(polygons.iter().any(|p| p.intersects(&pt)));
            }
        }
        Ok(())
    }

    #[test]
    fn test_pointy_batch_matches_swapped_engine_output() -> Result<(), HexGridError> {
        let extent = Extent::new(0.0, 0.0, 300.0, 500.0)?;
        let batch = build_pointy_batch(&extent, &[60.0], DEFAULT_MAX_HEXAGONS, false)?;
        let direct = tessellate(0.0, 0.0, 500.0, 300.0, 60.0)?;

        assert_eq!(batch.sets()[0], direct.transposed());
        Ok(())
    }

    #[test]
    fn test_features_scope_ids_per_size() -> Result<(), HexGridError> {
        let batch = build_batch(&extent()?, &[200.0, 100.0])?;
        let keys: Vec<HexKey> = batch.features().map(|(key, _)| key).collect();

        assert_eq!(keys.len(), batch.hexagon_count());
        assert_eq!(keys[0], HexKey::new(200.0, 0));

        let first_small = batch.sets()[0].len();
        assert_eq!(keys[first_small], HexKey::new(100.0, 0));
        assert_eq!(
            keys.last().map(|k| k.local_id),
            Some(batch.sets()[1].len() as u64 - 1)
        );
        Ok(())
    }
}
