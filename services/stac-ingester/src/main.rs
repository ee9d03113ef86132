//! STAC transaction ingester.
//!
//! Publishes catalog, collection and item JSON files (or directories of
//! them) to a STAC API, parents first.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use stac_ingester::{expand_inputs, load_documents, TransactionClient, DEFAULT_TIMEOUT};

#[derive(Parser, Debug)]
#[command(name = "stac-ingester")]
#[command(about = "Publish STAC JSON files to a STAC API transaction endpoint")]
struct Args {
    /// JSON files or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Root URL of the STAC API
    #[arg(long, env = "STAC_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Item requests in flight
    #[arg(short, long, default_value_t = 8)]
    workers: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();

    info!(api = %args.api_url, inputs = args.inputs.len(), "Starting STAC ingester");

    let (files, mut failures) = expand_inputs(&args.inputs);
    let (documents, load_failures) = load_documents(&files);
    failures.extend(load_failures);

    let client = TransactionClient::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;
    let report = client.publish_all(documents, args.workers).await;
    failures.extend(report.failed);

    for failure in &failures {
        error!(id = %failure.id, kind = failure.error.kind(), error = %failure.error, "Failed object");
    }
    info!(
        published = report.succeeded.len(),
        failed = failures.len(),
        "Finished"
    );

    if !failures.is_empty() {
        bail!("{} object(s) could not be published", failures.len());
    }
    Ok(())
}
