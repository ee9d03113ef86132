//! Static catalog persistence.
//!
//! A [`CatalogTree`] is laid out as a self-contained static catalog:
//!
//! ```text
//! catalog.json
//! {collection}/collection.json
//! {collection}/{item}/{item}.json
//! ```
//!
//! Links between documents are relative, so the tree can be moved or
//! mirrored. When a published base href is known the root catalog also
//! gets an absolute `self` link.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use cataloging::{CatalogTree, TileCollection};
use stac_common::{BatchReport, StacError, StacResult};
use stac_protocol::{media_type, rel, Item, Link};

use crate::object_store::ObjectStorage;

/// File name of the root catalog.
pub const ROOT_CATALOG_FILE: &str = "catalog.json";

/// File name of every collection document.
pub const COLLECTION_FILE: &str = "collection.json";

const TREE_RELS: [&str; 6] = [
    rel::ROOT,
    rel::PARENT,
    rel::CHILD,
    rel::ITEM,
    rel::COLLECTION,
    rel::SELF,
];

/// One serialized document of a laid-out tree.
#[derive(Debug, Clone)]
pub struct TreeDocument {
    /// Path relative to the tree root, `/`-separated.
    pub path: String,
    pub body: Bytes,
}

/// Destination of a static catalog tree.
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Write one document at a path relative to the tree root.
    async fn write_document(&self, relative_path: &str, body: Bytes) -> StacResult<()>;

    /// Where a relative path ends up (filesystem path or object key).
    fn location(&self, relative_path: &str) -> String;
}

/// Writes a tree under a local directory.
#[derive(Debug, Clone)]
pub struct LocalCatalogWriter {
    root: PathBuf,
}

impl LocalCatalogWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CatalogWriter for LocalCatalogWriter {
    async fn write_document(&self, relative_path: &str, body: Bytes) -> StacResult<()> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &body).await?;
        Ok(())
    }

    fn location(&self, relative_path: &str) -> String {
        self.root.join(relative_path).display().to_string()
    }
}

/// Writes a tree under a key prefix of a bucket.
#[derive(Clone)]
pub struct ObjectCatalogWriter {
    storage: ObjectStorage,
    prefix: String,
}

impl ObjectCatalogWriter {
    /// `prefix` may be empty to write at the bucket root.
    pub fn new(storage: ObjectStorage, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_matches('/').to_string();
        Self { storage, prefix }
    }

    fn key(&self, relative_path: &str) -> String {
        if self.prefix.is_empty() {
            relative_path.to_string()
        } else {
            format!("{}/{}", self.prefix, relative_path)
        }
    }
}

#[async_trait]
impl CatalogWriter for ObjectCatalogWriter {
    async fn write_document(&self, relative_path: &str, body: Bytes) -> StacResult<()> {
        self.storage.put(&self.key(relative_path), body).await
    }

    fn location(&self, relative_path: &str) -> String {
        self.key(relative_path)
    }
}

/// Relative path of a collection document.
pub fn collection_path(collection_id: &str) -> String {
    format!("{}/{}", collection_id, COLLECTION_FILE)
}

/// Relative path of an item document.
pub fn item_path(collection_id: &str, item_id: &str) -> String {
    format!("{}/{}/{}.json", collection_id, item_id, item_id)
}

fn replace_tree_links(links: &mut Vec<Link>, tree_links: Vec<Link>) {
    links.retain(|link| !TREE_RELS.contains(&link.rel.as_str()));
    links.extend(tree_links);
}

fn to_document<T: Serialize>(path: String, value: &T) -> StacResult<TreeDocument> {
    let body = serde_json::to_vec_pretty(value)?;
    Ok(TreeDocument {
        path,
        body: Bytes::from(body),
    })
}

fn layout_collection(tile: &TileCollection) -> StacResult<Vec<TreeDocument>> {
    let mut documents = Vec::with_capacity(tile.items.len() + 1);

    let mut collection = tile.collection.clone();
    let mut links = vec![
        Link::json(format!("../{}", ROOT_CATALOG_FILE), rel::ROOT),
        Link::json(format!("../{}", ROOT_CATALOG_FILE), rel::PARENT),
    ];
    for item in &tile.items {
        links.push(
            Link::new(format!("./{}/{}.json", item.id, item.id), rel::ITEM)
                .with_type(media_type::GEOJSON),
        );
    }
    replace_tree_links(&mut collection.links, links);
    documents.push(to_document(collection_path(&collection.id), &collection)?);

    for item in &tile.items {
        let mut item: Item = item.clone();
        replace_tree_links(
            &mut item.links,
            vec![
                Link::json(format!("../../{}", ROOT_CATALOG_FILE), rel::ROOT),
                Link::json(format!("../{}", COLLECTION_FILE), rel::PARENT),
                Link::json(format!("../{}", COLLECTION_FILE), rel::COLLECTION),
            ],
        );
        documents.push(to_document(item_path(&collection.id, &item.id), &item)?);
    }

    Ok(documents)
}

/// Serialize a tree into its documents, root catalog first.
pub fn layout_tree(tree: &CatalogTree, base_href: Option<&str>) -> StacResult<Vec<TreeDocument>> {
    let mut catalog = tree.catalog.clone();
    let mut links = vec![Link::json(format!("./{}", ROOT_CATALOG_FILE), rel::ROOT)];
    if let Some(base) = base_href {
        links.push(Link::json(
            format!("{}/{}", base.trim_end_matches('/'), ROOT_CATALOG_FILE),
            rel::SELF,
        ));
    }
    for tile in tree.collections() {
        links.push(Link::json(format!("./{}", collection_path(tile.id())), rel::CHILD));
    }
    replace_tree_links(&mut catalog.links, links);

    let mut documents = vec![to_document(ROOT_CATALOG_FILE.to_string(), &catalog)?];
    for tile in tree.collections() {
        documents.extend(layout_collection(tile)?);
    }
    Ok(documents)
}

/// Persist a tree and return the location of its root catalog.
#[instrument(skip(writer, tree), fields(collections = tree.collection_count()))]
pub async fn save_catalog<W>(
    writer: &W,
    tree: &CatalogTree,
    base_href: Option<&str>,
) -> StacResult<String>
where
    W: CatalogWriter + ?Sized,
{
    let documents = layout_tree(tree, base_href)?;
    let count = documents.len();
    for document in documents {
        debug!(path = %document.path, size = document.body.len(), "Writing document");
        writer.write_document(&document.path, document.body).await?;
    }

    let root = writer.location(ROOT_CATALOG_FILE);
    info!(documents = count, root = %root, "Saved catalog");
    Ok(root)
}

/// Write each item as `{id}.json` into `dir`, creating it if missing.
///
/// A failed write is recorded against the item id and does not stop the
/// remaining writes.
pub async fn write_item_files(dir: &Path, items: &[Item]) -> StacResult<BatchReport<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut report = BatchReport::new();
    for item in items {
        let path = dir.join(format!("{}.json", item.id));
        let outcome = async {
            let body = serde_json::to_vec_pretty(item)?;
            tokio::fs::write(&path, body).await?;
            Ok::<_, StacError>(path.clone())
        }
        .await;

        if let Err(e) = &outcome {
            warn!(item = %item.id, error = %e, "Failed to write item");
        }
        report.record(item.id.clone(), outcome);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths() {
        assert_eq!(collection_path("N00E005"), "N00E005/collection.json");
        assert_eq!(
            item_path("N00E005", "N00E005_FALL"),
            "N00E005/N00E005_FALL/N00E005_FALL.json"
        );
    }

    #[test]
    fn test_replace_tree_links_keeps_foreign_links() {
        let mut links = vec![
            Link::new("https://example.com/license", "license"),
            Link::new("./old.json", rel::ROOT),
        ];
        replace_tree_links(&mut links, vec![Link::new("./catalog.json", rel::ROOT)]);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel, "license");
        assert_eq!(links[1].href, "./catalog.json");
    }
}
