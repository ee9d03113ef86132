//! Storage for the coherence STAC tooling.
//!
//! Provides:
//! - Object storage (S3 compatible) listing, reads and writes
//! - Static catalog tree persistence to a local directory or a bucket

pub mod catalog_store;
pub mod object_store;

pub use self::object_store::{ObjectStorage, ObjectStorageConfig, DEFAULT_BUCKET, DEFAULT_REGION};
pub use catalog_store::{
    layout_tree, save_catalog, write_item_files, CatalogWriter, LocalCatalogWriter,
    ObjectCatalogWriter, TreeDocument, COLLECTION_FILE, ROOT_CATALOG_FILE,
};
