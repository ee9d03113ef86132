//! Root catalog and the merge of independently built tile collections.

use std::collections::BTreeMap;

use tracing::info;

use stac_common::UnitFailure;
use stac_protocol::Catalog;

use crate::collection::{TileCollection, TileOutcome};
use crate::config::{CATALOG_ID, DATA_CITATION, DESCRIPTION, LICENSE, LITERATURE_CITATION};

/// The root catalog of the dataset.
pub fn create_root_catalog() -> Catalog {
    Catalog::new(CATALOG_ID, DESCRIPTION)
        .with_extra_field("License", LICENSE)
        .with_extra_field("Data Citation", DATA_CITATION)
        .with_extra_field("Literature Citation", LITERATURE_CITATION)
}

/// A catalog with its child collections, keyed by collection id.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTree {
    pub catalog: Catalog,
    collections: BTreeMap<String, TileCollection>,
}

impl CatalogTree {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            collections: BTreeMap::new(),
        }
    }

    /// Add a child collection. A later collection with the same id replaces
    /// the earlier one.
    pub fn add_collection(&mut self, collection: TileCollection) {
        self.collections
            .insert(collection.id().to_string(), collection);
    }

    pub fn collection(&self, id: &str) -> Option<&TileCollection> {
        self.collections.get(id)
    }

    /// Children in id order.
    pub fn collections(&self) -> impl Iterator<Item = &TileCollection> {
        self.collections.values()
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn item_count(&self) -> usize {
        self.collections.values().map(|c| c.items.len()).sum()
    }
}

/// Fold tile outcomes into a catalog tree.
///
/// Built collections become children of `catalog`; failed tiles are returned
/// with the prefix they were listed under. Outcomes may arrive in any order.
pub fn merge_outcomes<I>(catalog: Catalog, outcomes: I) -> (CatalogTree, Vec<UnitFailure>)
where
    I: IntoIterator<Item = TileOutcome>,
{
    let (tree, failures) = outcomes.into_iter().fold(
        (CatalogTree::new(catalog), Vec::new()),
        |(mut tree, mut failures), outcome| {
            match outcome {
                TileOutcome::Built(collection) => tree.add_collection(collection),
                TileOutcome::Failed { prefix, error } => {
                    failures.push(UnitFailure::new(prefix, error))
                }
            }
            (tree, failures)
        },
    );

    info!(
        collections = tree.collection_count(),
        items = tree.item_count(),
        failed = failures.len(),
        "Merged tile collections"
    );
    (tree, failures)
}
