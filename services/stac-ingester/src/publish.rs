//! Transactional publishing of STAC objects to a STAC API.
//!
//! Catalogs and collections go to `POST {base}/collections`, items to
//! `POST {base}/collections/{collection}/items`. An object the API already
//! holds (HTTP 409) is sent once more as a `PUT` to the same URL.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use stac_common::{BatchReport, StacError, StacResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What kind of STAC object a document holds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum StacObjectKind {
    Catalog,
    Collection,
    Item { collection: String },
}

impl StacObjectKind {
    /// Catalogs and collections must exist before the items under them.
    pub fn publish_rank(&self) -> u8 {
        match self {
            StacObjectKind::Catalog => 0,
            StacObjectKind::Collection => 1,
            StacObjectKind::Item { .. } => 2,
        }
    }
}

/// A STAC object ready to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct StacDocument {
    pub id: String,
    pub kind: StacObjectKind,
    pub body: Value,
}

impl StacDocument {
    /// Classify a parsed JSON document by its `type` field.
    pub fn from_value(body: Value) -> StacResult<Self> {
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StacError::Format("STAC object has no string \"id\"".to_string()))?
            .to_string();

        let kind = match body.get("type").and_then(Value::as_str) {
            Some("Catalog") => StacObjectKind::Catalog,
            Some("Collection") => StacObjectKind::Collection,
            Some("Feature") => {
                let collection = body
                    .get("collection")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        StacError::Format(format!("Item {} has no parent collection", id))
                    })?;
                StacObjectKind::Item {
                    collection: collection.to_string(),
                }
            }
            other => {
                return Err(StacError::Format(format!(
                    "{} has unsupported type {:?}",
                    id, other
                )))
            }
        };

        Ok(Self { id, kind, body })
    }

    pub fn from_slice(bytes: &[u8]) -> StacResult<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }
}

/// How the API accepted an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Updated,
}

/// Transaction endpoint for a document.
pub fn endpoint_for(base_url: &str, document: &StacDocument) -> String {
    let base = base_url.trim_end_matches('/');
    match &document.kind {
        StacObjectKind::Catalog | StacObjectKind::Collection => format!("{}/collections", base),
        StacObjectKind::Item { collection } => {
            format!("{}/collections/{}/items", base, collection)
        }
    }
}

/// Client for the STAC API transaction extension.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    client: Client,
    base_url: String,
}

impl TransactionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> StacResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StacError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Publish one document: `POST`, then a single `PUT` on conflict.
    #[instrument(skip(self, document), fields(id = %document.id))]
    pub async fn publish(&self, document: &StacDocument) -> StacResult<PublishOutcome> {
        let url = endpoint_for(&self.base_url, document);

        let response = self
            .client
            .post(&url)
            .json(&document.body)
            .send()
            .await
            .map_err(|e| transport_error(&document.id, e))?;

        let status = response.status();
        if status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Created");
            return Ok(PublishOutcome::Created);
        }
        if status != StatusCode::CONFLICT {
            return Err(rejected(&document.id, response).await);
        }

        debug!(url = %url, "Already exists, updating");
        let response = self
            .client
            .put(&url)
            .json(&document.body)
            .send()
            .await
            .map_err(|e| transport_error(&document.id, e))?;

        if response.status().is_success() {
            Ok(PublishOutcome::Updated)
        } else {
            Err(rejected(&document.id, response).await)
        }
    }

    /// Publish documents in dependency order.
    ///
    /// Catalogs and collections are sent one at a time before any item;
    /// items are then sent with up to `workers` requests in flight. Every
    /// failure is recorded against its object id.
    pub async fn publish_all(
        &self,
        mut documents: Vec<StacDocument>,
        workers: usize,
    ) -> BatchReport<PublishOutcome> {
        documents.sort_by_key(|d| d.kind.publish_rank());
        let split = documents
            .iter()
            .position(|d| matches!(d.kind, StacObjectKind::Item { .. }))
            .unwrap_or(documents.len());
        let items = documents.split_off(split);

        let mut report = BatchReport::new();
        for document in &documents {
            let outcome = self.publish(document).await;
            log_outcome(document, &outcome);
            report.record(document.id.clone(), outcome);
        }

        let item_outcomes: Vec<(String, StacResult<PublishOutcome>)> = stream::iter(&items)
            .map(|document| async move {
                let outcome = self.publish(document).await;
                log_outcome(document, &outcome);
                (document.id.clone(), outcome)
            })
            .buffer_unordered(workers.max(1))
            .collect()
            .await;
        for (id, outcome) in item_outcomes {
            report.record(id, outcome);
        }

        info!(
            published = report.succeeded.len(),
            failed = report.failed.len(),
            "Publish run complete"
        );
        report
    }
}

fn log_outcome(document: &StacDocument, outcome: &StacResult<PublishOutcome>) {
    match outcome {
        Ok(result) => debug!(id = %document.id, outcome = ?result, "Published"),
        Err(e) => warn!(id = %document.id, error = %e, "Publish failed"),
    }
}

/// A request that never produced a response has status 0.
fn transport_error(id: &str, err: reqwest::Error) -> StacError {
    StacError::Transport {
        id: id.to_string(),
        status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        message: err.to_string(),
    }
}

async fn rejected(id: &str, response: reqwest::Response) -> StacError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    StacError::Transport {
        id: id.to_string(),
        status,
        message,
    }
}
