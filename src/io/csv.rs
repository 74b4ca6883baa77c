use crate::error::HexGridError;
use crate::io::arrow::FeatureSource;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Encoding of the geometry column in CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    #[default]
    Wkt,
    /// GeoJSON geometry object
    GeoJson,
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

pub trait HexFeaturesToCsv {
    /// Writes one row per hexagon: `id,size,key,family,geometry`.
    fn to_csv(&self, path: impl AsRef<Path>, format: GeometryFormat) -> Result<(), HexGridError>;
}

impl<T: FeatureSource + ?Sized> HexFeaturesToCsv for T {
    fn to_csv(&self, path: impl AsRef<Path>, format: GeometryFormat) -> Result<(), HexGridError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| HexGridError::IoError(e.to_string()))?;
        let mut writer = csv::Writer::from_writer(file);

        writer
            .write_record(["id", "size", "key", "family", "geometry"])
            .map_err(|e| HexGridError::CsvError(e.to_string()))?;

        let rows = self.feature_rows();
        for (key, hex) in &rows {
            let polygon = hex.to_polygon();
            let geom_str = match format {
                GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
            };
            writer
                .write_record([
                    key.local_id.to_string(),
                    key.radius.to_string(),
                    key.encode(),
                    hex.family.to_string(),
                    geom_str,
                ])
                .map_err(|e| HexGridError::CsvError(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| HexGridError::CsvError(e.to_string()))?;

        info!("wrote {} hexagons to {}", rows.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Extent, build_batch};
    use tempfile::tempdir;

    #[test]
    fn test_batch_to_csv_wkt() -> Result<(), HexGridError> {
        let extent = Extent::new(0.0, 0.0, 100.0, 100.0)?;
        let batch = build_batch(&extent, &[50.0, 100.0])?;

        let dir = tempdir().map_err(|e| HexGridError::IoError(e.to_string()))?;
        let path = dir.path().join("hexes.csv");
        batch.to_csv(&path, GeometryFormat::Wkt)?;

        let output =
            std::fs::read_to_string(&path).map_err(|e| HexGridError::IoError(e.to_string()))?;
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("id,size,key,family,geometry"));
        assert_eq!(output.lines().count(), batch.hexagon_count() + 1);
        assert!(output.contains("POLYGON"));

        // Second size group restarts its ids.
        let second_group_first = output
            .lines()
            .nth(batch.sets()[0].len() + 1)
            .unwrap_or_default();
        assert!(second_group_first.starts_with("0,100,"));
        Ok(())
    }

    #[test]
    fn test_set_to_csv_geojson() -> Result<(), HexGridError> {
        let set = crate::tessellate(0.0, 0.0, 100.0, 100.0, 50.0)?;

        let dir = tempdir().map_err(|e| HexGridError::IoError(e.to_string()))?;
        let path = dir.path().join("hexes.csv");
        set.to_csv(&path, GeometryFormat::GeoJson)?;

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| HexGridError::CsvError(e.to_string()))?;
        let mut count = 0;
        for record in reader.records() {
            let record = record.map_err(|e| HexGridError::CsvError(e.to_string()))?;
            assert!(record.get(4).unwrap_or_default().contains("\"Polygon\""));
            count += 1;
        }
        assert_eq!(count, 6);
        Ok(())
    }
}
