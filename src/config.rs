use crate::error::HexGridError;
use crate::grid::{DEFAULT_MAX_HEXAGONS, Extent, GridBatch, build_pointy_batch};
use crate::io::{
    GeometryFormat, HexFeaturesToCsv, HexFeaturesToGeoJson, HexFeaturesToGeoParquet,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// File format a job writes its grid batch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    GeoParquet,
    GeoJson,
    Csv(GeometryFormat),
}

impl OutputFormat {
    /// Infers the format from a file extension.
    ///
    /// `.parquet`/`.geoparquet`, `.geojson`/`.json` and `.csv` (WKT geometry).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "parquet" | "geoparquet" => Some(OutputFormat::GeoParquet),
            "geojson" | "json" => Some(OutputFormat::GeoJson),
            "csv" => Some(OutputFormat::Csv(GeometryFormat::Wkt)),
            _ => None,
        }
    }

    /// Whether the written file carries the EPSG code of its coordinates.
    ///
    /// GeoParquet stores it as CRS metadata and GeoJSON as a named `crs`
    /// member; CSV has nowhere to put it.
    pub fn records_crs(&self) -> bool {
        !matches!(self, OutputFormat::Csv(_))
    }
}

fn default_max_hexagons() -> usize {
    DEFAULT_MAX_HEXAGONS
}

/// Everything needed to generate and write one multi-size hexagon layer.
///
/// # Example
/// ```no_run
/// use hexgrids_rs::{Extent, GridJob};
///
/// # fn main() -> Result<(), hexgrids_rs::HexGridError> {
/// let extent = Extent::new(483_700.0, 6_953_200.0, 502_100.0, 6_972_300.0)?;
/// let summary = GridJob::new(extent, vec![20.0, 50.0, 100.0, 200.0], "brisbane.parquet")
///     .epsg(32756)
///     .parallel(true)
///     .run()?;
/// println!("{} hexagons", summary.total());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridJob {
    pub extent: Extent,
    pub sizes: Vec<f64>,
    pub output: PathBuf,
    /// Inferred from the output extension when absent.
    #[serde(default)]
    pub format: Option<OutputFormat>,
    /// EPSG code of the planar system the extent is expressed in.
    #[serde(default)]
    pub epsg: Option<u32>,
    #[serde(default = "default_max_hexagons")]
    pub max_hexagons: usize,
    #[serde(default)]
    pub parallel: bool,
}

/// What a finished job produced.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub output: PathBuf,
    pub format: OutputFormat,
    /// `(radius, hexagon count)` per size group, in request order.
    pub counts: Vec<(f64, usize)>,
}

impl JobSummary {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

impl GridJob {
    pub fn new(extent: Extent, sizes: Vec<f64>, output: impl Into<PathBuf>) -> Self {
        Self {
            extent,
            sizes,
            output: output.into(),
            format: None,
            epsg: None,
            max_hexagons: DEFAULT_MAX_HEXAGONS,
            parallel: false,
        }
    }

    /// Loads a job from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HexGridError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| HexGridError::ConfigError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_reader(file)
            .map_err(|e| HexGridError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn epsg(mut self, epsg: u32) -> Self {
        self.epsg = Some(epsg);
        self
    }

    pub fn max_hexagons(mut self, max_hexagons: usize) -> Self {
        self.max_hexagons = max_hexagons;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Output format, explicit or inferred from the output path.
    pub fn resolved_format(&self) -> Result<OutputFormat, HexGridError> {
        self.format
            .or_else(|| OutputFormat::from_path(&self.output))
            .ok_or_else(|| {
                HexGridError::ConfigError(format!(
                    "cannot infer output format from '{}', set one explicitly",
                    self.output.display()
                ))
            })
    }

    /// Generates the grid batch without writing anything.
    ///
    /// Hexagons come out pointy-top in map space: `2 * radius` tall along
    /// northing, `sqrt(3) * radius` wide along easting.
    pub fn build(&self) -> Result<GridBatch, HexGridError> {
        if self.sizes.is_empty() {
            return Err(HexGridError::InvalidInput(
                "at least one hexagon size is required".to_string(),
            ));
        }
        self.extent.validate()?;

        build_pointy_batch(&self.extent, &self.sizes, self.max_hexagons, self.parallel)
    }

    /// Builds the batch and writes it to the configured output.
    pub fn run(&self) -> Result<JobSummary, HexGridError> {
        let format = self.resolved_format()?;
        if let Some(epsg) = self.epsg
            && !format.records_crs()
        {
            warn!(
                "EPSG:{} cannot be recorded in {:?} output, {} carries bare coordinates",
                epsg,
                format,
                self.output.display()
            );
        }
        info!(
            "generating sizes {:?} over ({}, {})..({}, {})",
            self.sizes, self.extent.min_x, self.extent.min_y, self.extent.max_x, self.extent.max_y
        );

        let batch = self.build()?;
        for set in batch.sets() {
            info!("done for {}: {} hexagons", set.radius(), set.len());
        }

        match format {
            OutputFormat::GeoParquet => batch.to_geoparquet(&self.output, self.epsg)?,
            OutputFormat::GeoJson => batch.to_geojson(&self.output, self.epsg)?,
            OutputFormat::Csv(geometry) => batch.to_csv(&self.output, geometry)?,
        }

        Ok(JobSummary {
            output: self.output.clone(),
            format,
            counts: batch.sets().iter().map(|s| (s.radius(), s.len())).collect(),
        })
    }
}
