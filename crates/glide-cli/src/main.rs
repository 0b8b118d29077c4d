//! glide-plot - compute glide-range boundaries and write them as GeoJSON

mod config;
mod render;
mod request;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glide_core::models::sort_catalog;
use glide_core::{build_plot, GliderProfile, RingSpacing};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::request::PlotRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// FeatureCollection of markers, boundaries and labels
    Geojson,
    /// The raw computed plot
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SpacingArg {
    Thousands,
    EvenThousands,
    OddThousands,
}

impl From<SpacingArg> for RingSpacing {
    fn from(arg: SpacingArg) -> Self {
        match arg {
            SpacingArg::Thousands => RingSpacing::Thousands,
            SpacingArg::EvenThousands => RingSpacing::EvenThousands,
            SpacingArg::OddThousands => RingSpacing::OddThousands,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plot request JSON file
    request: PathBuf,

    /// Glider catalog JSON file (list of make/model/glide_ratio/vg)
    #[arg(long)]
    gliders: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Geojson)]
    format: OutputFormat,

    /// Override the request's ring spacing
    #[arg(long, value_enum)]
    spacing: Option<SpacingArg>,

    /// Lowest band altitude in feet
    #[arg(long)]
    min_altitude: Option<f64>,

    /// Highest band altitude in feet
    #[arg(long)]
    max_altitude: Option<f64>,
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Vec<GliderProfile>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading glider catalog {}", path.display()))?;
    let mut catalog: Vec<GliderProfile> = serde_json::from_str(&text)
        .with_context(|| format!("parsing glider catalog {}", path.display()))?;
    sort_catalog(&mut catalog);
    Ok(catalog)
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("glide_cli=info".parse()?)
            .add_directive("glide_core=info".parse()?))
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(min) = args.min_altitude {
        config.min_altitude_ft = min;
    }
    if let Some(max) = args.max_altitude {
        config.max_altitude_ft = max;
    }
    if args.gliders.is_some() {
        config.gliders_path = args.gliders.clone();
    }

    let catalog = load_catalog(config.gliders_path.as_ref())?;
    let text = fs::read_to_string(&args.request)
        .with_context(|| format!("reading request {}", args.request.display()))?;
    let request: PlotRequest = serde_json::from_str(&text)
        .with_context(|| format!("parsing request {}", args.request.display()))?;

    let input = request.resolve(&catalog, args.spacing.map(RingSpacing::from))?;
    let plot = build_plot(&input, &config.rules()).context("computing glide plot")?;

    for band in &plot.bands {
        tracing::info!(
            altitude_ft = band.altitude_ft,
            parts = band.parts.len(),
            skipped = band.skipped.len(),
            "Band ready"
        );
    }

    let value = match args.format {
        OutputFormat::Geojson => render::to_geojson(&plot),
        OutputFormat::Json => serde_json::to_value(&plot)?,
    };
    let body = serde_json::to_string_pretty(&value)?;

    match &args.output {
        Some(path) => fs::write(path, body)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
