//! Route tests for the HTTP API, using in-process stores and a mock extractor.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pagesure::{
    extractors::MockExtractor, DocumentStore, Extractor, MemoryStore, PageRecord, PageResolver,
    ResolverConfig, GENERIC_USER_MESSAGE,
};
use pagesure_server::server::{build_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const PAGE_URL: &str = "https://facebook.com/SomePage?ref=abc";

fn record() -> PageRecord {
    PageRecord::new()
        .with_field("name", "Some Page")
        .with_field("reviews", json!([{"rating": 5}]))
}

fn app_with(store: Arc<MemoryStore>, extractor: MockExtractor) -> Router {
    let store: Arc<dyn DocumentStore> = store;
    let extractor: Arc<dyn Extractor> = Arc::new(extractor);
    let resolver = PageResolver::with_config(store, extractor, ResolverConfig::default());
    build_app(AppState::new(resolver), None).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn resolve_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/resolve")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn resolve_miss_then_hit() {
    let store = Arc::new(MemoryStore::new());
    let extractor = MockExtractor::new().with_record(PAGE_URL, record());
    let app = app_with(store.clone(), extractor.clone());

    let (status, body) = send(app.clone(), resolve_request(json!({"url": PAGE_URL}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_id"], "SomePage");
    assert_eq!(body["source"], "extraction");
    assert_eq!(body["data"]["name"], "Some Page");

    let (status, body) = send(app, resolve_request(json!({"url": PAGE_URL}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "cache");

    assert_eq!(extractor.call_count(), 1);
    assert_eq!(store.document_count(), 1);
}

#[tokio::test]
async fn resolve_validation_errors_are_generic() {
    let extractor = MockExtractor::new();
    let app = app_with(Arc::new(MemoryStore::new()), extractor.clone());

    for (body, kind) in [
        (json!({"url": ""}), "empty_input"),
        (json!({}), "empty_input"),
        (json!({"url": "https://example.com/SomePage"}), "invalid_domain"),
        (json!({"url": "https://facebook.com/?x=1"}), "unresolvable_identifier"),
    ] {
        let (status, body) = send(app.clone(), resolve_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], GENERIC_USER_MESSAGE);
        assert_eq!(body["kind"], kind);
    }

    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn resolve_extraction_failure() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone(), MockExtractor::new().with_status(PAGE_URL, 500));

    let (status, body) = send(app, resolve_request(json!({"url": PAGE_URL}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], GENERIC_USER_MESSAGE);
    assert_eq!(body["kind"], "extraction_failed");
    assert_eq!(store.document_count(), 0);
}

#[tokio::test]
async fn page_lookup_reads_cache_only() {
    let store = Arc::new(
        MemoryStore::new()
            .with_document("pages", "profile_12345", record())
            .with_document("pages", "pages/Name/42", record()),
    );
    let extractor = MockExtractor::new();
    let app = app_with(store, extractor.clone());

    let (status, body) = send(app.clone(), get("/api/pages/profile_12345")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_id"], "profile_12345");
    assert_eq!(body["source"], "cache");
    assert_eq!(body["data"]["name"], "Some Page");

    let (status, body) = send(app.clone(), get("/api/pages/pages/Name/42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_id"], "pages/Name/42");

    let (status, _) = send(app, get("/api/pages/Unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn health() {
    let app = app_with(Arc::new(MemoryStore::new()), MockExtractor::new());

    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
