//! Object storage access for the coherence bucket (S3 compatible).

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{aws::AmazonS3Builder, path::Path, ObjectStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use stac_common::{StacError, StacResult};

/// Bucket holding the public dataset.
pub const DEFAULT_BUCKET: &str = "sentinel-1-global-coherence-earthbigdata";

/// Region of the public dataset bucket.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Configuration for object storage connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectStorageConfig {
    /// Bucket name
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom S3 endpoint (MinIO, localstack). `None` means AWS.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Allow HTTP (for local endpoints)
    #[serde(default)]
    pub allow_http: bool,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            allow_http: false,
        }
    }
}

impl ObjectStorageConfig {
    /// Public HTTP base of the bucket, always ending in `/`.
    ///
    /// AWS buckets use virtual-hosted style
    /// (`https://{bucket}.s3.{region}.amazonaws.com/`); custom endpoints use
    /// path style (`{endpoint}/{bucket}/`).
    pub fn public_base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/", endpoint.trim_end_matches('/'), self.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com/", self.bucket, self.region),
        }
    }
}

/// Object storage client for the dataset bucket.
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    base_url: String,
}

impl ObjectStorage {
    /// Create a new object storage client from config.
    pub fn new(config: &ObjectStorageConfig) -> StacResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder
                .with_access_key_id(key)
                .with_secret_access_key(secret);
        }
        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| StacError::Storage(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
            base_url: config.public_base_url(),
        })
    }

    /// Wrap an existing store, e.g. `object_store::memory::InMemory`.
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            base_url: base_url.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public HTTP base that object keys resolve against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of one object.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key.trim_start_matches('/'))
    }

    /// Write bytes to a path in the bucket.
    #[instrument(skip(self, data), fields(bucket = %self.bucket, path = %path))]
    pub async fn put(&self, path: &str, data: Bytes) -> StacResult<()> {
        let location = Path::from(path);
        debug!(size = data.len(), "Writing object");

        self.store
            .put(&location, data)
            .await
            .map_err(|e| StacError::Storage(format!("Failed to write {}: {}", path, e)))?;

        Ok(())
    }

    /// Check if an object exists.
    pub async fn exists(&self, path: &str) -> StacResult<bool> {
        let location = Path::from(path);

        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StacError::Storage(format!(
                "Failed to check {}: {}",
                path, e
            ))),
        }
    }

    /// List every key under a prefix, sorted.
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    pub async fn list(&self, prefix: &str) -> StacResult<Vec<String>> {
        let prefix_path = Path::from(prefix);
        let mut keys = Vec::new();

        let mut stream = self.store.list(Some(&prefix_path));
        while let Some(meta) = stream
            .try_next()
            .await
            .map_err(|e| StacError::Storage(format!("List of {} failed: {}", prefix, e)))?
        {
            keys.push(meta.location.to_string());
        }

        keys.sort();
        debug!(count = keys.len(), "Listed objects");
        Ok(keys)
    }

    /// Tile directories directly under `root`, as `{root}{tile}/` prefixes.
    ///
    /// Entries whose name contains a `.` are files, not tiles, and are
    /// skipped.
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    pub async fn list_tile_prefixes(&self, root: &str) -> StacResult<Vec<String>> {
        let root_path = Path::from(root);
        let listing = self
            .store
            .list_with_delimiter(Some(&root_path))
            .await
            .map_err(|e| StacError::Storage(format!("List of {} failed: {}", root, e)))?;

        let mut prefixes: Vec<String> = listing
            .common_prefixes
            .iter()
            .filter_map(|dir| dir.filename())
            .filter(|name| !name.contains('.'))
            .map(|name| format!("{}/", root_path.child(name)))
            .collect();
        prefixes.sort();
        prefixes.dedup();

        info!(count = prefixes.len(), root = %root, "Discovered tile prefixes");
        Ok(prefixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_base_url() {
        let config = ObjectStorageConfig::default();
        assert_eq!(
            config.public_base_url(),
            "https://sentinel-1-global-coherence-earthbigdata.s3.us-west-2.amazonaws.com/"
        );

        let local = ObjectStorageConfig {
            endpoint: Some("http://localhost:9000/".to_string()),
            bucket: "stac".to_string(),
            ..Default::default()
        };
        assert_eq!(local.public_base_url(), "http://localhost:9000/stac/");
    }

    #[test]
    fn test_config_from_partial_yaml() {
        let config: ObjectStorageConfig = serde_yaml::from_str("region: eu-central-1\n").unwrap();
        assert_eq!(config.bucket, DEFAULT_BUCKET);
        assert_eq!(config.region, "eu-central-1");
        assert!(config.endpoint.is_none());
    }
}
