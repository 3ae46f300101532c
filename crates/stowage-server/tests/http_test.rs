//! End-to-end requests through the router with in-memory collaborators.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt; // for `oneshot`

use stowage_core::config::StressConfig;
use stowage_observability::MetricsRegistry;
use stowage_server::routes::PROMETHEUS_CONTENT_TYPE;
use stowage_server::{router, AppState, KeyRule, StressSpawner, UploadService};
use test_fixtures::{FakeObjectStore, RecordingWorker};

const BOUNDARY: &str = "stowage-test-boundary";

struct TestApp {
    app: Router,
    store: Arc<FakeObjectStore>,
    worker: RecordingWorker,
}

fn test_app(bucket: Option<&str>) -> TestApp {
    let registry = Arc::new(MetricsRegistry::new());
    let store = Arc::new(FakeObjectStore::new());
    let worker = RecordingWorker::new();
    let uploads = UploadService::new(
        store.clone(),
        bucket.map(str::to_string),
        KeyRule::new("incoming/"),
        &registry,
    )
    .unwrap();
    let stress = StressSpawner::new(
        worker.clone(),
        &StressConfig {
            duration_secs: 30,
            workers: Some(2),
        },
        &registry,
    )
    .unwrap();
    TestApp {
        app: router(AppState::new(uploads, stress, registry), 1024),
        store,
        worker,
    }
}

fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut payload = Vec::new();
    for (name, filename, content) in parts {
        payload.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match filename {
            Some(f) => format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n"),
            None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
        };
        payload.extend_from_slice(disposition.as_bytes());
        payload.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        payload.extend_from_slice(content);
        payload.extend_from_slice(b"\r\n");
    }
    payload.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(payload))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

// --- probes ---

#[tokio::test]
async fn health_says_ok() {
    let t = test_app(Some("bkt"));
    let resp = t.app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");
}

#[tokio::test]
async fn metrics_exposes_upload_counters() {
    let t = test_app(Some("bkt"));
    let resp = t
        .app
        .clone()
        .oneshot(multipart_request(&[("file", Some("a.txt"), b"hi")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = t.app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        PROMETHEUS_CONTENT_TYPE
    );
    let text = body_text(resp).await;
    assert!(text.contains("# TYPE file_uploads_total counter"));
    assert!(text.contains("file_uploads_total{outcome=\"success\"} 1"));
    assert!(text.contains("file_uploads_total{outcome=\"failure\"} 0"));
}

// --- upload ---

#[tokio::test]
async fn upload_returns_receipt_and_stores_object() {
    let t = test_app(Some("bkt"));
    let resp = t
        .app
        .oneshot(multipart_request(&[
            ("note", None, b"ignored"),
            ("file", Some("report.pdf"), b"%PDF-1.7"),
        ]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["filename"], "report.pdf");
    assert_eq!(json["key"], "incoming/report.pdf");
    assert_eq!(json["url"], "s3://bkt/incoming/report.pdf");
    assert_eq!(
        t.store.object("bkt", "incoming/report.pdf").unwrap().as_ref(),
        b"%PDF-1.7"
    );
}

#[tokio::test]
async fn store_failure_is_a_generic_500() {
    let t = test_app(Some("bkt"));
    t.store.fail_puts(true);
    let resp = t
        .app
        .oneshot(multipart_request(&[("file", Some("a.txt"), b"x")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["detail"], "Failed to upload file");
}

#[tokio::test]
async fn missing_bucket_is_a_500_without_store_calls() {
    let t = test_app(None);
    let resp = t
        .app
        .oneshot(multipart_request(&[("file", Some("a.txt"), b"x")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(t.store.put_calls(), 0);
}

#[tokio::test]
async fn request_without_file_part_is_rejected() {
    let t = test_app(Some("bkt"));
    let resp = t
        .app
        .oneshot(multipart_request(&[("note", None, b"no file here")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["detail"], "No file provided");
}

#[tokio::test]
async fn empty_filename_is_rejected() {
    let t = test_app(Some("bkt"));
    let resp = t
        .app
        .oneshot(multipart_request(&[("file", Some(""), b"x")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(t.store.put_calls(), 0);
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let t = test_app(Some("bkt"));
    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = t.app.oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let t = test_app(Some("bkt"));
    let big = vec![b'x'; 4096];
    let resp = t
        .app
        .oneshot(multipart_request(&[("file", Some("big.bin"), big.as_slice())]))
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
    assert_eq!(t.store.put_calls(), 0);
}

// --- stress ---

#[tokio::test]
async fn test_route_acknowledges_and_starts_workers() {
    let t = test_app(Some("bkt"));
    let resp = t.app.oneshot(get("/test")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let text = body_text(resp).await;
    assert!(text.starts_with("Started 2 CPU stress workers for 30s"), "{text}");

    let runs = t.worker.wait_for(2, Duration::from_secs(5));
    assert_eq!(runs.len(), 2);
}
