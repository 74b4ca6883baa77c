use crate::error::HexGridError;
use crate::io::arrow::HexFeaturesToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use log::info;
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

/// Writes a hexagon record batch as a single-row-group GeoParquet file (WKB encoded).
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), HexGridError> {
    let path = path.as_ref();
    let schema = batch.schema();

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();

    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options)
        .map_err(|e| HexGridError::IoError(e.to_string()))?;

    let file = File::create(path).map_err(|e| HexGridError::IoError(e.to_string()))?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None)
        .map_err(|e| HexGridError::IoError(e.to_string()))?;

    let encoded_batch = encoder
        .encode_record_batch(batch)
        .map_err(|e| HexGridError::IoError(e.to_string()))?;

    writer
        .write(&encoded_batch)
        .map_err(|e| HexGridError::IoError(e.to_string()))?;

    let kv_metadata = encoder
        .into_keyvalue()
        .map_err(|e| HexGridError::IoError(e.to_string()))?;

    writer.append_key_value_metadata(kv_metadata);
    writer
        .finish()
        .map_err(|e| HexGridError::IoError(e.to_string()))?;

    info!("wrote {} hexagons to {}", batch.num_rows(), path.display());
    Ok(())
}

pub trait HexFeaturesToGeoParquet: HexFeaturesToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>, epsg: Option<u32>) -> Result<(), HexGridError>;
}

impl<T: HexFeaturesToArrow + ?Sized> HexFeaturesToGeoParquet for T {
    fn to_geoparquet(&self, path: impl AsRef<Path>, epsg: Option<u32>) -> Result<(), HexGridError> {
        let batch = self.to_record_batch(epsg)?;
        write_geoparquet(&batch, path)
    }
}
