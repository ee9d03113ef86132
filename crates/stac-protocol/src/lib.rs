//! SpatioTemporal Asset Catalog (STAC) objects.
//!
//! Typed Catalog, Collection and Item documents as written by the
//! coherence cataloging tools. Every object targets a single fixed STAC
//! version; items carry the SAR extension.
//!
//! # Example
//!
//! ```rust
//! use stac_protocol::{Catalog, Link};
//!
//! let catalog = Catalog::new("my-catalog", "A catalog of tiles");
//! assert_eq!(catalog.type_, "Catalog");
//! ```

pub mod catalog;
pub mod collection;
pub mod geojson;
pub mod item;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use collection::Collection;
pub use geojson::Geometry;
pub use item::{Asset, Item, ItemProperties, SarProperties};
pub use types::{media_type, rel, Extent, Link, SpatialExtent, TemporalExtent};

/// STAC specification version written into every object.
pub const STAC_VERSION: &str = "1.0.0";

/// Schema URI of the SAR extension.
pub const SAR_EXTENSION_SCHEMA: &str = "https://stac-extensions.github.io/sar/v1.0.0/schema.json";
