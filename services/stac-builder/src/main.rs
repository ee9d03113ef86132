//! STAC builder for the global seasonal Sentinel-1 coherence dataset.
//!
//! Reads object keys from the dataset bucket (or from a key list) and
//! writes STAC items, per-tile collections and the root catalog.

mod config;
mod pipeline;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use cataloging::config::TILES_ROOT_PREFIX;
use stac_common::UnitFailure;
use storage::{LocalCatalogWriter, ObjectCatalogWriter, ObjectStorage};

use config::BuilderConfig;
use pipeline::{
    build_catalog, finish_catalog, prefixes_from_keys, progress_bar, read_lines, run_items,
    write_lines,
};

#[derive(Parser, Debug)]
#[command(name = "stac-builder")]
#[command(about = "Build STAC metadata for the Sentinel-1 global coherence dataset")]
struct Args {
    /// YAML configuration file (default: environment variables)
    #[arg(short, long, env = "STAC_BUILDER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one item per key in a newline-delimited key list
    Items {
        /// File with one object key or URL per line
        input: PathBuf,

        /// Directory receiving `{item_id}.json`
        #[arg(short, long, default_value = "items")]
        output: PathBuf,

        /// Only process the first N keys
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Base URL keys are resolved against (default: the bucket URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Build one collection per tile and save the catalog tree
    Catalog {
        /// File of tile prefixes, one per line (default: discover from the bucket)
        #[arg(long, conflicts_with = "keys")]
        prefixes: Option<PathBuf>,

        /// File of object keys; tiles named in it are built
        #[arg(long)]
        keys: Option<PathBuf>,

        /// Only build the first N tiles
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Local output directory
        #[arg(short, long, default_value = "stac")]
        output: PathBuf,

        /// Write the tree into the bucket under this key prefix instead
        #[arg(long)]
        remote_prefix: Option<String>,

        /// Published location of the tree, for the root `self` link
        #[arg(long)]
        base_href: Option<String>,

        /// Tiles built concurrently (default from config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// File receiving the prefixes of tiles that failed
        #[arg(long, default_value = "invalid_tiles.txt")]
        invalid_tiles: PathBuf,
    },

    /// Write the list of tile prefixes
    Tiles {
        /// Derive tiles from a key list instead of listing the bucket
        #[arg(long)]
        keys: Option<PathBuf>,

        /// File receiving one prefix per line
        #[arg(short, long, default_value = "tile_prefixes.txt")]
        output: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .init();
}

fn report_failures(failures: &[UnitFailure]) {
    for failure in failures {
        warn!(id = %failure.id, kind = failure.error.kind(), error = %failure.error, "Failed unit");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match &args.config {
        Some(path) => BuilderConfig::from_yaml(path)?,
        None => BuilderConfig::from_env()?,
    };
    info!(bucket = %config.storage.bucket, region = %config.storage.region, "Loaded configuration");

    match args.command {
        Command::Items {
            input,
            output,
            limit,
            base_url,
        } => {
            let keys = read_lines(&input, limit)?;
            let base_url = base_url.unwrap_or_else(|| config.storage.public_base_url());
            info!(keys = keys.len(), base_url = %base_url, "Building items");

            let (written, failed) = run_items(&keys, &base_url, &output).await?;
            report_failures(&failed);
            report_failures(&written.failed);
            info!(
                written = written.succeeded.len(),
                failed = failed.len() + written.failed.len(),
                "Finished"
            );
        }

        Command::Catalog {
            prefixes,
            keys,
            limit,
            output,
            remote_prefix,
            base_href,
            workers,
            invalid_tiles,
        } => {
            let storage = ObjectStorage::new(&config.storage)?;

            let mut tile_prefixes = match (prefixes, keys) {
                (Some(path), _) => read_lines(&path, None)?,
                (None, Some(path)) => {
                    let (prefixes, failures) = prefixes_from_keys(&read_lines(&path, None)?);
                    report_failures(&failures);
                    prefixes
                }
                (None, None) => storage.list_tile_prefixes(TILES_ROOT_PREFIX).await?,
            };
            if let Some(n) = limit {
                tile_prefixes.truncate(n);
            }
            if tile_prefixes.is_empty() {
                bail!("No tiles to build");
            }

            let workers = workers.unwrap_or(config.workers);
            info!(tiles = tile_prefixes.len(), workers, "Building tile collections");

            let progress = progress_bar(tile_prefixes.len() as u64)?;
            let (tree, failures) = build_catalog(&storage, tile_prefixes, workers, &progress).await;
            report_failures(&failures);

            let root = match remote_prefix {
                Some(prefix) => {
                    let writer = ObjectCatalogWriter::new(storage.clone(), prefix);
                    finish_catalog(&writer, &tree, &failures, base_href.as_deref(), &invalid_tiles)
                        .await?
                }
                None => {
                    let writer = LocalCatalogWriter::new(&output);
                    finish_catalog(&writer, &tree, &failures, base_href.as_deref(), &invalid_tiles)
                        .await
                        .with_context(|| format!("Failed to write catalog to {}", output.display()))?
                }
            };

            info!(
                root = %root,
                collections = tree.collection_count(),
                items = tree.item_count(),
                failed = failures.len(),
                "Finished"
            );
        }

        Command::Tiles { keys, output } => {
            let prefixes = match keys {
                Some(path) => {
                    let (prefixes, failures) = prefixes_from_keys(&read_lines(&path, None)?);
                    report_failures(&failures);
                    prefixes
                }
                None => {
                    let storage = ObjectStorage::new(&config.storage)?;
                    storage.list_tile_prefixes(TILES_ROOT_PREFIX).await?
                }
            };

            write_lines(&output, &prefixes)?;
            info!(count = prefixes.len(), output = %output.display(), "Wrote tile prefixes");
        }
    }

    Ok(())
}
