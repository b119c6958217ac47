use std::sync::Arc;

use catalog_core::store::{BlobStore, DocumentStore};
use catalog_store::{StoreBackend, Stores};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (upload container, CORS origins).
    pub config: Arc<ServerConfig>,
    /// Catalog document collection.
    pub documents: Arc<dyn DocumentStore>,
    /// Blob storage for uploaded files.
    pub blobs: Arc<dyn BlobStore>,
    /// Which store implementation is wired in, reported by `/health`.
    pub store_backend: StoreBackend,
}

impl AppState {
    pub fn new(config: ServerConfig, stores: Stores, store_backend: StoreBackend) -> Self {
        Self {
            config: Arc::new(config),
            documents: stores.documents,
            blobs: stores.blobs,
            store_backend,
        }
    }
}
