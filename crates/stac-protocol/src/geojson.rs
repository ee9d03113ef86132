//! GeoJSON geometry for item footprints.

use serde::{Deserialize, Serialize};

use stac_common::BoundingBox;

/// A GeoJSON Polygon geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    /// Type identifier (always "Polygon").
    #[serde(rename = "type")]
    pub type_: String,

    /// Linear rings; the first is the exterior ring.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Geometry {
    /// Polygon covering a bounding box.
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self {
            type_: "Polygon".to_string(),
            coordinates: vec![bbox.exterior_ring()],
        }
    }
}
