//! STAC Catalog type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Link;
use crate::STAC_VERSION;

/// A STAC Catalog: the root of a static tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// Type identifier (always "Catalog").
    #[serde(rename = "type")]
    pub type_: String,

    pub stac_version: String,

    #[serde(default)]
    pub stac_extensions: Vec<String>,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    #[serde(default)]
    pub links: Vec<Link>,

    /// Dataset-specific top-level fields (license text, citations).
    #[serde(flatten)]
    pub extra_fields: BTreeMap<String, Value>,
}

impl Catalog {
    /// Create a new catalog with required fields.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_: "Catalog".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: Vec::new(),
            id: id.into(),
            title: None,
            description: description.into(),
            links: Vec::new(),
            extra_fields: BTreeMap::new(),
        }
    }

    /// Add a top-level field.
    pub fn with_extra_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_fields.insert(key.into(), value.into());
        self
    }
}
