#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_core::store::{BlobStore, DocumentStore};
use catalog_store::{InMemoryBlobStore, InMemoryDocumentStore, StoreBackend, Stores};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        upload_container: "netflix-catalogs".to_string(),
    }
}

/// Router plus handles on the in-memory stores behind it.
pub struct TestApp {
    pub router: Router,
    pub documents: Arc<InMemoryDocumentStore>,
    pub blobs: Arc<InMemoryBlobStore>,
}

/// Build the full application router over fresh in-memory stores.
pub fn build_test_app() -> TestApp {
    let documents = Arc::new(InMemoryDocumentStore::new());
    let blobs = Arc::new(InMemoryBlobStore::new());
    let stores = Stores {
        documents: documents.clone(),
        blobs: blobs.clone(),
    };
    let router = build_app_router(AppState::new(test_config(), stores, StoreBackend::Memory));
    TestApp {
        router,
        documents,
        blobs,
    }
}

/// Build the application router over caller-supplied stores.
pub fn build_app_with(
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
) -> Router {
    build_app_router(AppState::new(
        test_config(),
        Stores { documents, blobs },
        StoreBackend::Memory,
    ))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_bytes(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/octet-stream")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
