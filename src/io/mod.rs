pub mod arrow;
pub mod csv;
pub mod geojson;
pub mod parquet;

pub use arrow::{FeatureSource, HexFeaturesToArrow};
pub use csv::{GeometryFormat, HexFeaturesToCsv};
pub use geojson::HexFeaturesToGeoJson;
pub use parquet::{HexFeaturesToGeoParquet, write_geoparquet};
