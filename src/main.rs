use clap::{Parser, ValueEnum};
use hexgrids_rs::{Extent, GeometryFormat, GridJob, HexGridError, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Geoparquet,
    Geojson,
    CsvWkt,
    CsvGeojson,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Geoparquet => OutputFormat::GeoParquet,
            FormatArg::Geojson => OutputFormat::GeoJson,
            FormatArg::CsvWkt => OutputFormat::Csv(GeometryFormat::Wkt),
            FormatArg::CsvGeojson => OutputFormat::Csv(GeometryFormat::GeoJson),
        }
    }
}

/// Generate multi-size tessellating hexagon grids over a planar extent.
#[derive(Debug, Parser)]
#[command(name = "hexgrids", version)]
struct Cli {
    /// JSON job file; flags given alongside override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extent in projected metres.
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        value_name = "MIN_X,MIN_Y,MAX_X,MAX_Y",
        conflicts_with = "extent_geometry"
    )]
    extent: Option<Vec<f64>>,

    /// WKT or GeoJSON geometry whose bounding box is the extent.
    #[arg(long, value_name = "WKT|GEOJSON")]
    extent_geometry: Option<String>,

    /// Hexagon radii (centre to vertex), e.g. 20,50,100,200.
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<f64>>,

    /// Output file; the extension picks the format unless --format is given.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// EPSG code of the extent's coordinate system, recorded in GeoParquet output.
    #[arg(long)]
    epsg: Option<u32>,

    /// Per-size hexagon limit.
    #[arg(long)]
    max_hexagons: Option<usize>,

    /// Generate the sizes in parallel.
    #[arg(long)]
    parallel: bool,
}

fn cli_extent(cli: &Cli) -> Result<Option<Extent>, HexGridError> {
    if let Some(values) = &cli.extent {
        return match values.as_slice() {
            [min_x, min_y, max_x, max_y] => Extent::new(*min_x, *min_y, *max_x, *max_y).map(Some),
            _ => Err(HexGridError::ConfigError(format!(
                "--extent takes 4 values, got {}",
                values.len()
            ))),
        };
    }
    cli.extent_geometry
        .as_deref()
        .map(Extent::from_geometry_str)
        .transpose()
}

fn job_from_cli(cli: Cli) -> Result<GridJob, HexGridError> {
    let extent = cli_extent(&cli)?;

    let mut job = match &cli.config {
        Some(path) => GridJob::from_json_file(path)?,
        None => {
            let missing =
                |flag: &str| HexGridError::ConfigError(format!("{} is required without --config", flag));
            let extent = extent.ok_or_else(|| missing("--extent or --extent-geometry"))?;
            let sizes = cli.sizes.clone().ok_or_else(|| missing("--sizes"))?;
            let output = cli.output.clone().ok_or_else(|| missing("--output"))?;
            GridJob::new(extent, sizes, output)
        }
    };

    if let Some(extent) = extent {
        job.extent = extent;
    }
    if let Some(sizes) = cli.sizes {
        job.sizes = sizes;
    }
    if let Some(output) = cli.output {
        job.output = output;
    }
    if let Some(format) = cli.format {
        job = job.format(format.into());
    }
    if let Some(epsg) = cli.epsg {
        job = job.epsg(epsg);
    }
    if let Some(max) = cli.max_hexagons {
        job = job.max_hexagons(max);
    }
    if cli.parallel {
        job = job.parallel(true);
    }
    Ok(job)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = job_from_cli(cli).and_then(|job| job.run());

    match result {
        Ok(summary) => {
            for (size, count) in &summary.counts {
                println!("size {}: {} hexagons", size, count);
            }
            println!(
                "Wrote {} hexagons to {}",
                summary.total(),
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
