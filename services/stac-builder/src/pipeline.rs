//! Builder pipelines: key lists to item files, tile prefixes to a catalog.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use cataloging::config::tile_prefix;
use cataloging::{
    build_items, build_tile_outcome, create_root_catalog, dataset_collection, merge_outcomes,
    unique_tiles, CatalogTree, TileOutcome,
};
use stac_common::{BatchReport, UnitFailure};
use storage::{save_catalog, write_item_files, CatalogWriter, ObjectStorage, COLLECTION_FILE};

/// Read a newline-delimited list, skipping blank lines. `limit` keeps the
/// first `n` entries.
pub fn read_lines(path: &Path, limit: Option<usize>) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string);

    Ok(match limit {
        Some(n) => lines.take(n).collect(),
        None => lines.collect(),
    })
}

/// Write one entry per line, creating parent directories.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut body = String::new();
    for line in lines {
        body.push_str(line.as_ref());
        body.push('\n');
    }
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}

/// Progress bar over `len` units.
pub fn progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tiles {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Tile prefixes for every unique tile named in a key list.
pub fn prefixes_from_keys(keys: &[String]) -> (Vec<String>, Vec<UnitFailure>) {
    let (tiles, report) = unique_tiles(keys.iter().map(String::as_str));
    for failure in &report.failed {
        warn!(key = %failure.id, error = %failure.error, "Key names no tile");
    }
    let prefixes = tiles.iter().map(|tile| tile_prefix(tile.as_str())).collect();
    (prefixes, report.failed)
}

/// Build one item per key and write each to `{output}/{id}.json`, next to
/// the `collection.json` of their parent collection.
#[instrument(skip(keys), fields(keys = keys.len()))]
pub async fn run_items(
    keys: &[String],
    base_url: &str,
    output: &Path,
) -> Result<(BatchReport<PathBuf>, Vec<UnitFailure>)> {
    let built = build_items(keys, base_url);
    let written = write_item_files(output, &built.succeeded)
        .await
        .with_context(|| format!("Failed to prepare output directory {}", output.display()))?;

    let collection_path = output.join(COLLECTION_FILE);
    let collection = serde_json::to_vec_pretty(&dataset_collection())?;
    std::fs::write(&collection_path, collection)
        .with_context(|| format!("Failed to write {}", collection_path.display()))?;

    info!(
        written = written.succeeded.len(),
        build_failures = built.failed.len(),
        write_failures = written.failed.len(),
        output = %output.display(),
        "Item run complete"
    );
    Ok((written, built.failed))
}

/// List one tile prefix and build its collection.
async fn build_tile(storage: &ObjectStorage, prefix: String) -> TileOutcome {
    match storage.list(&prefix).await {
        Ok(keys) => {
            let urls: Vec<String> = keys.iter().map(|key| storage.object_url(key)).collect();
            build_tile_outcome(&prefix, &urls)
        }
        Err(error) => {
            warn!(prefix = %prefix, error = %error, "Tile listing failed");
            TileOutcome::Failed { prefix, error }
        }
    }
}

/// Build every tile with at most `workers` in flight, then merge the
/// results under the root catalog.
///
/// Repeated prefixes are built once, and `progress` is resized to the
/// number of distinct tiles.
#[instrument(skip(storage, prefixes, progress), fields(tiles = prefixes.len()))]
pub async fn build_catalog(
    storage: &ObjectStorage,
    prefixes: Vec<String>,
    workers: usize,
    progress: &ProgressBar,
) -> (CatalogTree, Vec<UnitFailure>) {
    let unique: BTreeSet<String> = prefixes.into_iter().collect();
    progress.set_length(unique.len() as u64);

    let outcomes: Vec<TileOutcome> = stream::iter(unique)
        .map(|prefix| build_tile(storage, prefix))
        .buffer_unordered(workers.max(1))
        .inspect(|_| progress.inc(1))
        .collect()
        .await;
    progress.finish_with_message("done");

    merge_outcomes(create_root_catalog(), outcomes)
}

/// Persist a built tree and record failed tile prefixes.
pub async fn finish_catalog<W>(
    writer: &W,
    tree: &CatalogTree,
    failures: &[UnitFailure],
    base_href: Option<&str>,
    invalid_tiles: &Path,
) -> Result<String>
where
    W: CatalogWriter + ?Sized,
{
    let root = save_catalog(writer, tree, base_href)
        .await
        .context("Failed to save catalog")?;

    let invalid: Vec<&str> = failures.iter().map(|f| f.id.as_str()).collect();
    write_lines(invalid_tiles, &invalid)?;
    if !invalid.is_empty() {
        warn!(
            count = invalid.len(),
            file = %invalid_tiles.display(),
            "Some tiles could not be built"
        );
    }
    Ok(root)
}
