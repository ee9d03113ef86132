//! STAC Item and Asset types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stac_common::time::stac_datetime;
use stac_common::BoundingBox;

use crate::geojson::Geometry;
use crate::types::Link;
use crate::{SAR_EXTENSION_SCHEMA, STAC_VERSION};

/// A STAC Item: one GeoJSON Feature with temporal properties and assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub stac_version: String,

    #[serde(default)]
    pub stac_extensions: Vec<String>,

    pub id: String,

    pub geometry: Geometry,

    /// `[min_x, min_y, max_x, max_y]`
    pub bbox: [f64; 4],

    pub properties: ItemProperties,

    #[serde(default)]
    pub links: Vec<Link>,

    pub assets: BTreeMap<String, Asset>,

    /// Id of the parent collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl Item {
    /// Create an item covering `bbox`, with the SAR extension declared.
    pub fn new(id: impl Into<String>, bbox: &BoundingBox, properties: ItemProperties) -> Self {
        Self {
            type_: "Feature".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: vec![SAR_EXTENSION_SCHEMA.to_string()],
            id: id.into(),
            geometry: Geometry::from_bbox(bbox),
            bbox: bbox.bounds(),
            properties,
            links: Vec::new(),
            assets: BTreeMap::new(),
            collection: None,
        }
    }

    /// Set the parent collection id.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Add an asset under `key`, replacing any previous asset with that key.
    pub fn add_asset(&mut self, key: impl Into<String>, asset: Asset) {
        self.assets.insert(key.into(), asset);
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_bounds(self.bbox)
    }
}

/// Item properties: tile, temporal bounds and the SAR extension fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemProperties {
    pub tile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// Nominal observation instant; `null` when only a range applies.
    #[serde(default, with = "stac_datetime::option")]
    pub datetime: Option<DateTime<Utc>>,

    #[serde(with = "stac_datetime")]
    pub start_datetime: DateTime<Utc>,

    #[serde(with = "stac_datetime")]
    pub end_datetime: DateTime<Utc>,

    #[serde(flatten)]
    pub sar: SarProperties,
}

/// Fields of the SAR extension (v1.0.0).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SarProperties {
    #[serde(rename = "sar:instrument_mode")]
    pub instrument_mode: String,

    #[serde(rename = "sar:frequency_band")]
    pub frequency_band: String,

    /// GHz
    #[serde(rename = "sar:center_frequency")]
    pub center_frequency: f64,

    #[serde(
        rename = "sar:polarizations",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub polarizations: Vec<String>,

    #[serde(rename = "sar:product_type")]
    pub product_type: String,

    #[serde(rename = "sar:looks_range")]
    pub looks_range: u32,

    #[serde(rename = "sar:looks_azimuth")]
    pub looks_azimuth: u32,

    #[serde(rename = "sar:observation_direction")]
    pub observation_direction: String,
}

/// A file referenced by an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub href: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Repeat-pass interval of coherence products, e.g. "36 days".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_separation: Option<String>,
}

impl Asset {
    pub fn new(href: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            media_type: Some(media_type.into()),
            polarization: None,
            product: None,
            temporal_separation: None,
        }
    }

    pub fn with_polarization(mut self, polarization: impl Into<String>) -> Self {
        self.polarization = Some(polarization.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_temporal_separation(mut self, separation: impl Into<String>) -> Self {
        self.temporal_separation = Some(separation.into());
        self
    }
}
