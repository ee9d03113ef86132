//! Core STAC types shared by catalogs, collections and items.

use serde::{Deserialize, Serialize};

use stac_common::{format_stac_datetime, BoundingBox, DateRange};

/// Well-known media types.
pub mod media_type {
    pub const GEOTIFF: &str = "image/tiff; application=geotiff";
    pub const JSON: &str = "application/json";
    pub const GEOJSON: &str = "application/geo+json";
}

/// Link relation types used in static catalogs.
pub mod rel {
    pub const ROOT: &str = "root";
    pub const PARENT: &str = "parent";
    pub const CHILD: &str = "child";
    pub const ITEM: &str = "item";
    pub const COLLECTION: &str = "collection";
    pub const SELF: &str = "self";
}

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "root", "child", "item").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
        }
    }

    /// A link to a JSON document.
    pub fn json(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::new(href, rel).with_type(media_type::JSON)
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The spatial and temporal extent of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,
}

impl Extent {
    /// Extent with one bounding box and one closed interval.
    pub fn new(bbox: &BoundingBox, interval: &DateRange) -> Self {
        Self {
            spatial: SpatialExtent {
                bbox: vec![bbox.bounds().to_vec()],
            },
            temporal: TemporalExtent::new(
                Some(format_stac_datetime(&interval.start)),
                Some(format_stac_datetime(&interval.end)),
            ),
        }
    }
}

/// Spatial extent with bounding boxes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes as [west, south, east, north] arrays.
    pub bbox: Vec<Vec<f64>>,
}

/// Temporal extent with time intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Time intervals as [start, end] pairs (ISO 8601).
    /// null values indicate open-ended intervals.
    pub interval: Vec<Vec<Option<String>>>,
}

impl TemporalExtent {
    /// Create a temporal extent from start and end times.
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            interval: vec![vec![start, end]],
        }
    }
}
