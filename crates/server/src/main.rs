// crates/server/src/main.rs
//! Eunlg server binary.
//!
//! Loads the pre-generated dataset caches into memory, builds the similarity
//! filter, and serves the report API. Cache generation happens offline; a
//! missing cache file is a fatal startup error, not something to retry.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

use eunlg_core::{create_filter, FilterConfig, FilterVariant, PipelineContext};
use eunlg_data::DataStore;
use eunlg_realizer::Realizer;
use eunlg_server::{create_app, AppState};
use eunlg_types::ScoreWeights;

/// Default port for the server.
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(name = "eunlg", version, about = "Statistical news generation server")]
struct Cli {
    /// Port to listen on. Falls back to EUNLG_PORT, then PORT, then 8080.
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the pre-generated dataset caches.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Datasets to load at startup.
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "cphi,health_cost,health_funding"
    )]
    datasets: Vec<String>,

    /// Similarity filter: "rule" or "embedding".
    #[arg(long, default_value = "rule")]
    filter: FilterVariant,

    /// Similarity above which a candidate message is dropped.
    #[arg(long, default_value_t = eunlg_core::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Word vector file for the embedding filter.
    #[arg(long)]
    vectors: Option<PathBuf>,

    /// Max concurrent report runs when the embedding filter is active.
    #[arg(long, default_value_t = 2)]
    embed_concurrency: usize,

    /// JSON file overriding the default fact-kind scoring weights.
    #[arg(long)]
    weights: Option<PathBuf>,
}

/// Get the server port from the CLI flag, environment, or default.
fn get_port(cli_port: Option<u16>) -> u16 {
    cli_port
        .or_else(|| {
            std::env::var("EUNLG_PORT")
                .ok()
                .or_else(|| std::env::var("PORT").ok())
                .and_then(|p| p.parse().ok())
        })
        .unwrap_or(DEFAULT_PORT)
}

fn load_weights(path: &Path) -> Result<ScoreWeights> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading weights file {}", path.display()))?;
    let weights = serde_json::from_str(&raw)
        .with_context(|| format!("parsing weights file {}", path.display()))?;
    Ok(weights)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default (startup UX uses eprintln); RUST_LOG overrides.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();

    eprintln!("\n\u{1f4f0} eunlg v{}\n", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(DataStore::load(&cli.data_dir, &cli.datasets)?);
    eprintln!(
        "  \u{2713} Loaded {} dataset caches from {}",
        store.datasets().len(),
        cli.data_dir.display()
    );

    let filter = create_filter(&FilterConfig {
        variant: cli.filter,
        vectors_path: cli.vectors.clone(),
    })?;

    let mut pipeline = PipelineContext::new(filter);
    pipeline.threshold = cli.threshold;
    if let Some(path) = &cli.weights {
        pipeline.weights = load_weights(path)?;
    }

    // The rule filter is cheap; only embedding runs need bounding.
    let report_gate = match cli.filter {
        FilterVariant::Embedding => Some(Arc::new(Semaphore::new(cli.embed_concurrency))),
        FilterVariant::RuleBased => None,
    };

    let state = AppState::new(store, Arc::new(Realizer::new()), pipeline, report_gate);
    let app = create_app(state);

    let port = get_port(cli.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("  \u{2192} http://localhost:{}\n", port);

    axum::serve(listener, app).await?;

    Ok(())
}
