use crate::error::HexGridError;

/// Derived measurements of one tile in the tessellation.
///
/// All values share the unit of the radius (metres for a projected extent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDims {
    /// Centre-to-vertex distance.
    pub radius: f64,
    /// Flat-to-flat extent between the two horizontal edges.
    pub height: f64,
    /// Horizontal distance from an edge end to the side vertex on the midline.
    pub mid_len: f64,
    /// Horizontal offset between the straight and shifted families.
    pub col_step: f64,
    /// Vertical offset between the straight and shifted families.
    pub row_step: f64,
    pub area: f64,
}

impl TileDims {
    /// Computes the tile measurements for a centre-to-vertex `radius`.
    pub fn from_radius(radius: f64) -> Result<Self, HexGridError> {
        if !radius.is_finite() {
            return Err(HexGridError::InvalidInput(format!(
                "radius must be finite, got {}",
                radius
            )));
        }
        if radius <= 0.0 {
            return Err(HexGridError::InvalidInput(format!(
                "radius must be positive, got {}",
                radius
            )));
        }

        // Closed forms of sqrt(r² - (r/2)²) * 2 and sqrt(r² - (h/2)²); no squares to overflow.
        let height = 3.0_f64.sqrt() * radius;
        let mid_len = radius / 2.0;
        let col_step = radius * 1.5;
        let row_step = height / 2.0;

        if [height, mid_len, col_step, row_step]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(HexGridError::InvalidInput(format!(
                "radius {} is too large to tessellate",
                radius
            )));
        }

        let area = (3.0 * 3.0_f64.sqrt() / 2.0) * radius * radius;

        Ok(Self {
            radius,
            height,
            mid_len,
            col_step,
            row_step,
            area,
        })
    }
}
