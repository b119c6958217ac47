//! Capability traits for the two managed stores.
//!
//! Handlers and the seeder only talk to these traits, so a live service
//! and an in-memory fake are interchangeable.

use async_trait::async_trait;
use bytes::Bytes;

use crate::catalog::Document;
use crate::error::StoreError;

/// Partitioned document collection keyed (and partitioned) by `id`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Fails with [`StoreError::Conflict`] when the id exists.
    async fn create(&self, doc: Document) -> Result<Document, StoreError>;

    /// Read one document by id. `Ok(None)` when absent.
    async fn get_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Read every document in the collection, unbounded.
    async fn list_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Insert or overwrite a document.
    async fn upsert(&self, doc: Document) -> Result<Document, StoreError>;
}

/// Named-container blob storage with overwrite-on-conflict writes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `data` under `container/name`, replacing any existing blob.
    /// Returns the URL of the stored blob.
    async fn put(&self, container: &str, name: &str, data: Bytes) -> Result<String, StoreError>;
}
