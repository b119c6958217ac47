//! Minimal HTTP emulators for the document and blob services.
//!
//! Each emulator verifies the request signature with the account key the
//! tests configure, keeps state in memory, and is served from an
//! ephemeral local port.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use catalog_store::signing::{decode_key, master_key_token, shared_key_signature, SharedKeyRequest};

/// Account key shared by the emulators and the clients under test.
pub const ACCOUNT_KEY: &str = "c2VjcmV0LWtleQ==";

/// Blob account name served by [`blob_router`].
pub const ACCOUNT_NAME: &str = "acct";

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Document service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct DocumentEmulator {
    pub docs: Arc<Mutex<BTreeMap<String, Value>>>,
    /// Documents per read-feed page.
    pub page_size: usize,
    /// When set, every request is answered with this status and body.
    pub failure: Option<(StatusCode, &'static str)>,
}

impl Default for DocumentEmulator {
    fn default() -> Self {
        Self {
            docs: Arc::default(),
            page_size: 100,
            failure: None,
        }
    }
}

pub fn document_router(state: DocumentEmulator) -> Router {
    Router::new()
        .route(
            "/dbs/{db}/colls/{coll}/docs",
            get(read_feed).post(write_doc),
        )
        .route("/dbs/{db}/colls/{coll}/docs/{id}", get(read_doc))
        .with_state(state)
}

fn check_master_key(headers: &HeaderMap, verb: &str, link: &str) -> Result<(), Response> {
    let key = decode_key(ACCOUNT_KEY).unwrap();
    let expected = master_key_token(&key, verb, "docs", link, header(headers, "x-ms-date"));
    if header(headers, "authorization") != expected {
        return Err((StatusCode::UNAUTHORIZED, "signature mismatch").into_response());
    }
    if header(headers, "x-ms-version") != "2018-12-31" {
        return Err((StatusCode::BAD_REQUEST, "unsupported version").into_response());
    }
    Ok(())
}

fn with_system_properties(mut doc: Value, id: &str) -> Value {
    if let Some(map) = doc.as_object_mut() {
        map.insert("_rid".into(), json!(format!("rid-{id}")));
        map.insert("_self".into(), json!(format!("dbs/x/colls/y/docs/{id}")));
        map.insert("_etag".into(), json!("\"0000\""));
        map.insert("_attachments".into(), json!("attachments/"));
        map.insert("_ts".into(), json!(1_760_000_000));
    }
    doc
}

async fn write_doc(
    State(state): State<DocumentEmulator>,
    Path((db, coll)): Path<(String, String)>,
    headers: HeaderMap,
    Json(doc): Json<Value>,
) -> Response {
    if let Some((status, body)) = state.failure {
        return (status, body).into_response();
    }
    if let Err(rejection) = check_master_key(&headers, "POST", &format!("dbs/{db}/colls/{coll}")) {
        return rejection;
    }

    let id = doc["id"].as_str().unwrap_or_default().to_string();
    if header(&headers, "x-ms-documentdb-partitionkey") != json!([id]).to_string() {
        return (StatusCode::BAD_REQUEST, "partition key mismatch").into_response();
    }
    let upsert = header(&headers, "x-ms-documentdb-is-upsert") == "True";

    let mut docs = state.docs.lock().unwrap();
    let existed = docs.contains_key(&id);
    if existed && !upsert {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "Conflict",
                "message": "Entity with the specified id already exists in the system."
            })),
        )
            .into_response();
    }

    let stored = with_system_properties(doc, &id);
    docs.insert(id, stored.clone());
    let status = if existed { StatusCode::OK } else { StatusCode::CREATED };
    (status, Json(stored)).into_response()
}

async fn read_doc(
    State(state): State<DocumentEmulator>,
    Path((db, coll, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some((status, body)) = state.failure {
        return (status, body).into_response();
    }
    if let Err(rejection) =
        check_master_key(&headers, "GET", &format!("dbs/{db}/colls/{coll}/docs/{id}"))
    {
        return rejection;
    }

    match state.docs.lock().unwrap().get(&id) {
        Some(doc) => Json(doc.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"code": "NotFound", "message": "Entity with the specified id does not exist in the system."})),
        )
            .into_response(),
    }
}

async fn read_feed(
    State(state): State<DocumentEmulator>,
    Path((db, coll)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some((status, body)) = state.failure {
        return (status, body).into_response();
    }
    if let Err(rejection) = check_master_key(&headers, "GET", &format!("dbs/{db}/colls/{coll}")) {
        return rejection;
    }

    let offset: usize = header(&headers, "x-ms-continuation").parse().unwrap_or(0);
    let docs = state.docs.lock().unwrap();
    let page: Vec<Value> = docs
        .values()
        .skip(offset)
        .take(state.page_size)
        .cloned()
        .collect();
    let next = offset + page.len();

    let mut response_headers = HeaderMap::new();
    if next < docs.len() {
        response_headers.insert("x-ms-continuation", next.to_string().parse().unwrap());
    }
    let count = page.len();
    (
        response_headers,
        Json(json!({"_rid": "coll", "Documents": page, "_count": count})),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Blob service
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct BlobEmulator {
    /// Blob content keyed by `container/name`.
    pub blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

/// Routes for account [`ACCOUNT_NAME`] with a path-style endpoint
/// (`{base}/acct/{container}/{name}`).
pub fn blob_router(state: BlobEmulator) -> Router {
    Router::new()
        .route("/acct/{container}/{name}", put(put_blob))
        .with_state(state)
}

/// Connection string pointing at a [`blob_router`] served from `base_url`.
pub fn blob_connection_string(base_url: &str, key: &str) -> String {
    format!("AccountName={ACCOUNT_NAME};AccountKey={key};BlobEndpoint={base_url}/{ACCOUNT_NAME}")
}

async fn put_blob(
    State(state): State<BlobEmulator>,
    Path((container, name)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if header(&headers, "x-ms-blob-type") != "BlockBlob" {
        return (StatusCode::BAD_REQUEST, "unsupported blob type").into_response();
    }

    let key = decode_key(ACCOUNT_KEY).unwrap();
    let canonical_resource = format!("/{ACCOUNT_NAME}{}", uri.path());
    let ms_headers = [
        ("x-ms-blob-type", header(&headers, "x-ms-blob-type")),
        ("x-ms-date", header(&headers, "x-ms-date")),
        ("x-ms-version", header(&headers, "x-ms-version")),
    ];
    let signature = shared_key_signature(
        &key,
        &SharedKeyRequest {
            verb: "PUT",
            content_length: body.len(),
            content_type: header(&headers, "content-type"),
            ms_headers: &ms_headers,
            canonical_resource: &canonical_resource,
        },
    );
    if header(&headers, "authorization") != format!("SharedKey {ACCOUNT_NAME}:{signature}") {
        return (
            StatusCode::FORBIDDEN,
            "<Error><Code>AuthenticationFailed</Code></Error>",
        )
            .into_response();
    }

    state
        .blobs
        .lock()
        .unwrap()
        .insert(format!("{container}/{name}"), body.to_vec());
    StatusCode::CREATED.into_response()
}
