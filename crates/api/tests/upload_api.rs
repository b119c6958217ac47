//! Integration tests for `POST /api/upload_file`.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use bytes::Bytes;
use common::{body_json, build_test_app, post_bytes};

use catalog_core::error::StoreError;
use catalog_core::store::BlobStore;
use catalog_store::InMemoryDocumentStore;

#[tokio::test]
async fn upload_stores_body_and_returns_url() {
    let app = build_test_app();

    let response = post_bytes(app.router, "/api/upload_file?filename=x.txt", "hello").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "File x.txt uploaded successfully");
    assert_eq!(json["url"], "memory://netflix-catalogs/x.txt");
    assert_eq!(
        app.blobs.get("netflix-catalogs", "x.txt").await.unwrap(),
        Bytes::from_static(b"hello")
    );
}

#[tokio::test]
async fn reupload_overwrites_content() {
    let app = build_test_app();

    post_bytes(app.router.clone(), "/api/upload_file?filename=x.txt", "hello").await;
    let response = post_bytes(app.router, "/api/upload_file?filename=x.txt", "world").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.blobs.len().await, 1);
    assert_eq!(
        app.blobs.get("netflix-catalogs", "x.txt").await.unwrap(),
        Bytes::from_static(b"world")
    );
}

#[tokio::test]
async fn empty_body_is_accepted() {
    let app = build_test_app();

    let response = post_bytes(app.router, "/api/upload_file?filename=empty.csv", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.blobs.get("netflix-catalogs", "empty.csv").await.unwrap().is_empty());
}

#[tokio::test]
async fn large_body_is_not_limited() {
    let app = build_test_app();
    let payload = vec![b'x'; 4 * 1024 * 1024];

    let response = post_bytes(app.router, "/api/upload_file?filename=big.bin", payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        app.blobs.get("netflix-catalogs", "big.bin").await.unwrap().len(),
        4 * 1024 * 1024
    );
}

#[tokio::test]
async fn missing_filename_returns_400() {
    let app = build_test_app();

    for uri in ["/api/upload_file", "/api/upload_file?filename="] {
        let response = post_bytes(app.router.clone(), uri, "hello").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body_json(response).await["error"],
            "Parameter 'filename' not provided"
        );
    }
    assert!(app.blobs.is_empty().await);
}

struct RejectingBlobs;

#[async_trait]
impl BlobStore for RejectingBlobs {
    async fn put(&self, _container: &str, _name: &str, _data: Bytes) -> Result<String, StoreError> {
        Err(StoreError::Backend {
            status: 403,
            body: "AuthenticationFailed".into(),
        })
    }
}

#[tokio::test]
async fn blob_store_failure_returns_500_with_raw_text() {
    let router = common::build_app_with(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(RejectingBlobs),
    );

    let response = post_bytes(router, "/api/upload_file?filename=x.txt", "hello").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BACKEND_ERROR");
    assert_eq!(json["error"], "Store returned HTTP 403: AuthenticationFailed");
}
