//! Converter API Server
//!
//! Accepts KML uploads with their overlay images and returns CZML.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use converter_api::config::ServiceConfig;
use converter_api::state::AppState;

/// Converter API Server
#[derive(Parser, Debug)]
#[command(name = "converter-api")]
#[command(about = "HTTP service converting KML ground overlays to CZML")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8085", env = "CONVERTER_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// YAML configuration file
    #[arg(long, default_value = "config/converter.yaml", env = "CONVERTER_CONFIG")]
    config: PathBuf,

    /// Maximum upload size in megabytes (overrides the config file)
    #[arg(long, env = "CONVERTER_MAX_UPLOAD_MB")]
    max_upload_mb: Option<usize>,

    /// Number of worker threads
    #[arg(long, env = "CONVERTER_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Prometheus metrics exporter initialized");
    info!("Starting converter API server");

    let mut config = ServiceConfig::load(&args.config)?;
    if let Some(mb) = args.max_upload_mb {
        config.max_upload_mb = mb;
    }

    let state = Arc::new(AppState::new(config, Some(prometheus_handle)));

    let app = converter_api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!("Converter API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
