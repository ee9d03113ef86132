//! Builder configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use storage::{ObjectStorageConfig, DEFAULT_BUCKET, DEFAULT_REGION};

/// Default number of tiles built concurrently.
pub const DEFAULT_WORKERS: usize = 20;

/// Top-level builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuilderConfig {
    /// Bucket holding the dataset
    #[serde(default)]
    pub storage: ObjectStorageConfig,

    /// Number of tiles built concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            storage: ObjectStorageConfig::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from a YAML file. Missing fields take defaults.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let storage = ObjectStorageConfig {
            bucket: env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            region: env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            endpoint: env::var("S3_ENDPOINT").ok(),
            access_key_id: env::var("S3_ACCESS_KEY").ok(),
            secret_access_key: env::var("S3_SECRET_KEY").ok(),
            allow_http: env::var("S3_ALLOW_HTTP")
                .map(|v| v == "true")
                .unwrap_or(false),
        };

        let workers = match env::var("STAC_WORKERS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("STAC_WORKERS must be a positive integer, got {}", v))?,
            Err(_) => DEFAULT_WORKERS,
        };

        Ok(Self { storage, workers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_yaml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage:\n  bucket: my-copy\n  allow_http: true").unwrap();

        let config = BuilderConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.storage.bucket, "my-copy");
        assert_eq!(config.storage.region, DEFAULT_REGION);
        assert!(config.storage.allow_http);
        assert_eq!(config.workers, DEFAULT_WORKERS);
    }

    #[test]
    fn test_from_yaml_reports_missing_file() {
        let err = BuilderConfig::from_yaml("/nonexistent/builder.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
