use crate::error::HexGridError;
use crate::geom::Hexagon;
use crate::grid::{GridBatch, HexSet};
use crate::index::HexKey;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::PolygonArray;
use geoarrow_array::builder::PolygonBuilder;
use geoarrow_schema::{Crs, Dimension, Metadata, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

/// Anything that can hand out hexagons with their composite keys, in output order.
///
/// Implemented for [`GridBatch`] and [`HexSet`].
pub trait FeatureSource {
    fn feature_rows(&self) -> Vec<(HexKey, &Hexagon)>;
}

impl FeatureSource for GridBatch {
    fn feature_rows(&self) -> Vec<(HexKey, &Hexagon)> {
        self.features().collect()
    }
}

impl FeatureSource for HexSet {
    fn feature_rows(&self) -> Vec<(HexKey, &Hexagon)> {
        self.features().collect()
    }
}

fn crs_metadata(epsg: Option<u32>) -> Arc<Metadata> {
    match epsg {
        Some(code) => {
            let crs = Crs::from_authority_code(format!("EPSG:{}", code));
            Arc::new(Metadata::new(crs, None))
        }
        None => Arc::new(Metadata::default()),
    }
}

/// Conversion of generated hexagons to Arrow arrays.
///
/// `epsg` is recorded as the CRS of the geometry column when given; the
/// hexagons themselves are never reprojected.
pub trait HexFeaturesToArrow {
    /// Converts the hexagons to an Arrow PolygonArray.
    fn to_arrow_polygons(&self, epsg: Option<u32>) -> PolygonArray;
    /// Converts the hexagons to a RecordBatch with id, size, key, family and geometry.
    fn to_record_batch(&self, epsg: Option<u32>) -> Result<RecordBatch, HexGridError>;
}

impl<T: FeatureSource + ?Sized> HexFeaturesToArrow for T {
    fn to_arrow_polygons(&self, epsg: Option<u32>) -> PolygonArray {
        let rows = self.feature_rows();
        polygon_array(&rows, epsg)
    }

    fn to_record_batch(&self, epsg: Option<u32>) -> Result<RecordBatch, HexGridError> {
        let rows = self.feature_rows();
        let polygon_array = polygon_array(&rows, epsg);

        let ids: UInt64Array = rows.iter().map(|(k, _)| Some(k.local_id)).collect();
        let sizes: Float64Array = rows.iter().map(|(k, _)| Some(k.radius)).collect();
        let keys: StringArray = rows.iter().map(|(k, _)| Some(k.encode())).collect();
        let families: StringArray = rows.iter().map(|(_, h)| Some(h.family.as_str())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("id", DataType::UInt64, false),
            Field::new("size", DataType::Float64, false),
            Field::new("key", DataType::Utf8, false),
            Field::new("family", DataType::Utf8, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(ids),
                Arc::new(sizes),
                Arc::new(keys),
                Arc::new(families),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| HexGridError::IoError(e.to_string()))
    }
}

fn polygon_array(rows: &[(HexKey, &Hexagon)], epsg: Option<u32>) -> PolygonArray {
    let poly = PolygonType::new(Dimension::XY, crs_metadata(epsg));
    let polygons: Vec<_> = rows.par_iter().map(|(_, h)| h.to_polygon()).collect();
    PolygonBuilder::from_polygons(&polygons, poly).finish()
}
