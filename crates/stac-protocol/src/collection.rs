//! STAC Collection type.

use serde::{Deserialize, Serialize};

use crate::types::{Extent, Link};
use crate::STAC_VERSION;

/// A STAC Collection: a group of items sharing an extent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Type identifier (always "Collection").
    #[serde(rename = "type")]
    pub type_: String,

    pub stac_version: String,

    #[serde(default)]
    pub stac_extensions: Vec<String>,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    pub license: String,

    pub extent: Extent,

    #[serde(default)]
    pub links: Vec<Link>,
}

impl Collection {
    /// Create a new collection with required fields.
    pub fn new(id: impl Into<String>, description: impl Into<String>, extent: Extent) -> Self {
        Self {
            type_: "Collection".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: Vec::new(),
            id: id.into(),
            title: None,
            description: description.into(),
            license: "proprietary".to_string(),
            extent,
            links: Vec::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the license (SPDX identifier or "proprietary").
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }
}
