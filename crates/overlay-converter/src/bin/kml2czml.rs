//! Command-line KML to CZML converter.
//!
//! Usage:
//!   kml2czml overlays.kml --images ./images --output overlays.czml
//!
//! Images are keyed by file name, the same way uploads are keyed by the
//! HTTP service.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use overlay_common::ConversionDefaults;
use overlay_converter::{ImageTable, OverlayConverter};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "kml2czml")]
#[command(about = "Convert KML ground overlays into a CZML document")]
struct Args {
    /// KML document to convert
    kml: PathBuf,

    /// Directory holding the images referenced by Icon/href
    #[arg(short, long)]
    images: Option<PathBuf>,

    /// Also load images from subdirectories
    #[arg(long)]
    recursive: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// YAML file overriding conversion defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Close the last overlay's interval at this instant
    #[arg(long)]
    final_end: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();

    let mut defaults = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {:?}", path))?;
            serde_yaml::from_str::<ConversionDefaults>(&content)
                .with_context(|| format!("Failed to parse config: {:?}", path))?
        }
        None => ConversionDefaults::default(),
    };
    if let Some(end) = args.final_end {
        defaults = defaults.with_final_end(end);
    }

    let kml = fs::read_to_string(&args.kml)
        .with_context(|| format!("Failed to read KML: {:?}", args.kml))?;

    let images = match &args.images {
        Some(dir) => ImageTable::from_dir(dir, args.recursive)
            .with_context(|| format!("Failed to load images from {:?}", dir))?,
        None => ImageTable::new(),
    };
    info!(images = images.len(), kml = ?args.kml, "Inputs loaded");

    let conversion = OverlayConverter::new(defaults)
        .convert(&kml, &images)
        .with_context(|| format!("Failed to convert {:?}", args.kml))?;

    let json = if args.pretty {
        conversion.document.to_json_pretty()?
    } else {
        conversion.document.to_json()?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            info!(output = ?path, overlays = conversion.report.overlays, "CZML written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if conversion.report.images_missing > 0 {
        eprintln!(
            "warning: {} overlay image(s) not found, default image used",
            conversion.report.images_missing
        );
    }

    Ok(())
}
