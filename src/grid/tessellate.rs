use crate::error::HexGridError;
use crate::geom::{Family, Hexagon, TileDims, x_profile, y_profile};
use crate::grid::extent::Extent;
use crate::grid::hex_set::HexSet;
use log::{debug, warn};

/// Default upper bound on the number of hexagons one tessellation may produce.
pub const DEFAULT_MAX_HEXAGONS: usize = 5_000_000;

/// Tessellates the box `(bottom_x, bottom_y)`..`(top_x, top_y)` with hexagons of `radius`.
///
/// The box and radius must share one planar unit. Corner order is not
/// normalized here: `bottom_x > top_x` or `bottom_y > top_y` is an error.
///
/// # Example
/// ```
/// use hexgrids_rs::tessellate;
///
/// # fn main() -> Result<(), hexgrids_rs::HexGridError> {
/// let set = tessellate(0.0, 0.0, 100.0, 100.0, 50.0)?;
/// assert_eq!(set.len(), 6);
/// assert!(set.iter().all(|hex| hex.is_closed()));
/// # Ok(())
/// # }
/// ```
pub fn tessellate(
    bottom_x: f64,
    bottom_y: f64,
    top_x: f64,
    top_y: f64,
    radius: f64,
) -> Result<HexSet, HexGridError> {
    let extent = Extent::new(bottom_x, bottom_y, top_x, top_y)?;
    tessellate_extent(&extent, radius, DEFAULT_MAX_HEXAGONS)
}

/// Tessellates `extent`, failing with `CapacityExceeded` past `max_hexagons`.
///
/// The tiling is expanded by `mid_len` horizontally and half a tile height
/// vertically so hexagons along the boundary are drawn whole and grids of
/// different radii nest without holes at the edge of the extent.
///
/// Memory grows with `extent area / radius²`. The limit is checked before
/// any ring is allocated.
pub fn tessellate_extent(
    extent: &Extent,
    radius: f64,
    max_hexagons: usize,
) -> Result<HexSet, HexGridError> {
    extent.validate()?;
    let dims = TileDims::from_radius(radius)?;

    let start_x = extent.min_x - dims.mid_len;
    let end_x = extent.max_x + dims.mid_len;
    let start_y = extent.min_y - dims.height / 2.0;
    let end_y = extent.max_y + dims.height / 2.0;
    if [start_x, end_x, start_y, end_y].iter().any(|v| !v.is_finite()) {
        return Err(HexGridError::InvalidInput(format!(
            "extent expanded by radius {} leaves the representable range",
            radius
        )));
    }

    // A series longer than the limit already exceeds it, so never generate more.
    let xs = series(start_x, end_x, 2.0 * dims.col_step, max_hexagons.saturating_add(1));
    let ys = series(start_y, end_y, 2.0 * dims.row_step, max_hexagons.saturating_add(1));

    let count = xs
        .len()
        .saturating_mul(ys.len())
        .saturating_mul(Family::ALL.len());
    if count > max_hexagons {
        return Err(HexGridError::CapacityExceeded {
            radius,
            count,
            limit: max_hexagons,
        });
    }
    if count > max_hexagons / 10 {
        warn!(
            "radius {} produces {} hexagons, over a tenth of the {} limit",
            radius, count, max_hexagons
        );
    }

    let mut hexagons = Vec::with_capacity(count);
    for family in Family::ALL {
        let (dx, dy) = family.offset(&dims);
        let x_profiles: Vec<[f64; 7]> = xs.iter().map(|&x| x_profile(x + dx, &dims)).collect();
        let y_profiles: Vec<[f64; 7]> = ys.iter().map(|&y| y_profile(y + dy, &dims)).collect();

        for (row, y_prof) in y_profiles.iter().enumerate() {
            for (col, x_prof) in x_profiles.iter().enumerate() {
                hexagons.push(Hexagon::from_profiles(x_prof, y_prof, family, row, col));
            }
        }
    }

    debug!(
        "tessellated radius {} over {}x{}: {} columns x {} rows per family, {} hexagons",
        radius,
        extent.width(),
        extent.height(),
        xs.len(),
        ys.len(),
        hexagons.len()
    );

    Ok(HexSet::new(radius, hexagons))
}

/// Positions `start + i * step` strictly below `end`, at most `cap` of them.
fn series(start: f64, end: f64, step: f64, cap: usize) -> Vec<f64> {
    (0..cap)
        .map(|i| start + i as f64 * step)
        .take_while(|&v| v < end)
        .collect()
}
