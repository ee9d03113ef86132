//! Filename decoding and STAC assembly for the global seasonal Sentinel-1
//! coherence dataset.
//!
//! Keys flow through the pipeline as:
//!
//! ```text
//! object key -> metadata::parse_key -> ParsedAsset
//!            -> item::build_item            (one item per key)
//!            -> grouping::build_tile_items  (one item per tile and season)
//!            -> collection::assemble_collection -> catalog::merge_outcomes
//! ```
//!
//! Everything here is pure; listing, persistence and publishing live in the
//! `storage` crate and the service binaries.

pub mod batch;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod grouping;
pub mod item;
pub mod metadata;

pub use batch::build_items;
pub use catalog::{create_root_catalog, merge_outcomes, CatalogTree};
pub use collection::{
    assemble_collection, build_tile_collection, build_tile_outcome, dataset_collection,
    TileCollection, TileOutcome,
};
pub use grouping::{build_seasonal_item, build_tile_items, group_tile_assets, TileAssets};
pub use item::{build_item, create_stac_item, resolve_href, DATA_ASSET_KEY};
pub use metadata::{
    item_id_from_key, parse_grouping_key, parse_item_key, parse_key, unique_tiles, KeyCase,
    ParsedAsset, SeasonalMetadata,
};
