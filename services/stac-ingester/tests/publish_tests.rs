//! Publisher tests against a stub STAC API.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use stac_common::StacError;
use stac_ingester::{PublishOutcome, StacDocument, TransactionClient};

#[derive(Clone, Default)]
struct StubApi {
    existing: Arc<Mutex<HashSet<String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubApi {
    fn with_existing(ids: &[&str]) -> Self {
        let stub = Self::default();
        stub.existing
            .lock()
            .unwrap()
            .extend(ids.iter().map(|id| id.to_string()));
        stub
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn body_id(body: &Value) -> String {
    body["id"].as_str().unwrap_or_default().to_string()
}

async fn create(State(stub): State<StubApi>, uri: Uri, Json(body): Json<Value>) -> StatusCode {
    let id = body_id(&body);
    stub.requests
        .lock()
        .unwrap()
        .push(format!("POST {} {}", uri.path(), id));

    if id == "broken" {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if stub.existing.lock().unwrap().insert(id) {
        StatusCode::CREATED
    } else {
        StatusCode::CONFLICT
    }
}

async fn update(State(stub): State<StubApi>, uri: Uri, Json(body): Json<Value>) -> StatusCode {
    let id = body_id(&body);
    stub.requests
        .lock()
        .unwrap()
        .push(format!("PUT {} {}", uri.path(), id));

    if id == "locked" {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::OK
    }
}

/// Serve the stub on an ephemeral port and return its base URL.
async fn spawn_stub(stub: StubApi) -> String {
    let app = Router::new()
        .route("/collections", post(create).put(update))
        .route("/collections/:collection/items", post(create).put(update))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn document(value: Value) -> StacDocument {
    StacDocument::from_value(value).unwrap()
}

fn client(base: &str) -> TransactionClient {
    TransactionClient::new(base, Duration::from_secs(5)).unwrap()
}

// ============================================================================
// Single objects
// ============================================================================

#[tokio::test]
async fn test_new_object_is_created() {
    let stub = StubApi::default();
    let base = spawn_stub(stub.clone()).await;

    let outcome = client(&base)
        .publish(&document(json!({"type": "Collection", "id": "N00E005"})))
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::Created);
    assert_eq!(stub.requests(), vec!["POST /collections N00E005"]);
}

#[tokio::test]
async fn test_conflict_retries_once_as_put() {
    let stub = StubApi::with_existing(&["N00E005_FALL"]);
    let base = spawn_stub(stub.clone()).await;

    let item = document(json!({"type": "Feature", "id": "N00E005_FALL", "collection": "N00E005"}));
    let outcome = client(&base).publish(&item).await.unwrap();

    assert_eq!(outcome, PublishOutcome::Updated);
    assert_eq!(
        stub.requests(),
        vec![
            "POST /collections/N00E005/items N00E005_FALL",
            "PUT /collections/N00E005/items N00E005_FALL",
        ]
    );
}

#[tokio::test]
async fn test_failed_put_is_transport_error() {
    let stub = StubApi::with_existing(&["locked"]);
    let base = spawn_stub(stub.clone()).await;

    let err = client(&base)
        .publish(&document(json!({"type": "Catalog", "id": "locked"})))
        .await
        .unwrap_err();

    match err {
        StacError::Transport { id, status, .. } => {
            assert_eq!(id, "locked");
            assert_eq!(status, 403);
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(stub.requests().len(), 2);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let stub = StubApi::default();
    let base = spawn_stub(stub.clone()).await;

    let err = client(&base)
        .publish(&document(json!({"type": "Collection", "id": "broken"})))
        .await
        .unwrap_err();

    assert!(matches!(err, StacError::Transport { status: 500, .. }));
    assert_eq!(stub.requests(), vec!["POST /collections broken"]);
}

#[tokio::test]
async fn test_unreachable_api() {
    let err = client("http://127.0.0.1:9")
        .publish(&document(json!({"type": "Catalog", "id": "root"})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "transport");
}

// ============================================================================
// Batches
// ============================================================================

#[tokio::test]
async fn test_batch_publishes_parents_first_and_isolates_failures() {
    let stub = StubApi::with_existing(&["N00E005"]);
    let base = spawn_stub(stub.clone()).await;

    let documents = vec![
        document(json!({"type": "Feature", "id": "N00E005_FALL", "collection": "N00E005"})),
        document(json!({"type": "Feature", "id": "broken", "collection": "N00E005"})),
        document(json!({"type": "Collection", "id": "N00E005"})),
        document(json!({"type": "Catalog", "id": "root"})),
    ];

    let report = client(&base).publish_all(documents, 2).await;

    assert_eq!(report.succeeded.len(), 3);
    assert_eq!(report.failed_ids(), vec!["broken"]);

    let requests = stub.requests();
    assert_eq!(
        &requests[..3],
        &[
            "POST /collections root".to_string(),
            "POST /collections N00E005".to_string(),
            "PUT /collections N00E005".to_string(),
        ]
    );
    assert_eq!(requests.len(), 5);
}
