//! In-process store implementations with the same semantics as the
//! managed services. Used for local runs without cloud credentials and
//! as injectable fakes in tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use catalog_core::catalog::{document_id, Document};
use catalog_core::error::StoreError;
use catalog_core::store::{BlobStore, DocumentStore};

/// Document collection held in memory, keyed by id.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<BTreeMap<String, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, doc: Document) -> Result<Document, StoreError> {
        let id = document_id(&doc)?.to_string();
        let mut docs = self.docs.write().await;
        if docs.contains_key(&id) {
            return Err(StoreError::Conflict(format!(
                "a document with id '{id}' already exists"
            )));
        }
        docs.insert(id, doc.clone());
        Ok(doc)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.docs.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.docs.read().await.values().cloned().collect())
    }

    async fn upsert(&self, doc: Document) -> Result<Document, StoreError> {
        let id = document_id(&doc)?.to_string();
        self.docs.write().await.insert(id, doc.clone());
        Ok(doc)
    }
}

/// Blob containers held in memory. URLs use the `memory://` scheme.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<(String, String), Bytes>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of `container/name`, if any.
    pub async fn get(&self, container: &str, name: &str) -> Option<Bytes> {
        self.blobs
            .read()
            .await
            .get(&(container.to_string(), name.to_string()))
            .cloned()
    }

    /// Number of blobs across all containers.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, container: &str, name: &str, data: Bytes) -> Result<String, StoreError> {
        self.blobs
            .write()
            .await
            .insert((container.to_string(), name.to_string()), data);
        Ok(format!("memory://{container}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_rejects_duplicate_and_keeps_original() {
        let store = InMemoryDocumentStore::new();
        store.create(doc(json!({"id": "10", "name": "Test"}))).await.unwrap();

        let err = store
            .create(doc(json!({"id": "10", "name": "Other"})))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Conflict(_));

        let stored = store.get_by_id("10").await.unwrap().unwrap();
        assert_eq!(stored["name"], "Test");
    }

    #[tokio::test]
    async fn upsert_overwrites() {
        let store = InMemoryDocumentStore::new();
        store.upsert(doc(json!({"id": "1", "title": "A"}))).await.unwrap();
        store.upsert(doc(json!({"id": "1", "title": "B"}))).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get_by_id("1").await.unwrap().unwrap()["title"], "B");
    }

    #[tokio::test]
    async fn get_missing_is_none_and_list_is_unbounded() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get_by_id("nope").await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());

        for i in 0..150 {
            store.create(doc(json!({"id": i.to_string()}))).await.unwrap();
        }
        assert_eq!(store.list_all().await.unwrap().len(), 150);
    }

    #[tokio::test]
    async fn documents_without_id_are_rejected() {
        let store = InMemoryDocumentStore::new();
        assert_matches!(
            store.create(doc(json!({"name": "x"}))).await,
            Err(StoreError::InvalidDocument(_))
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn blob_put_overwrites_same_name() {
        let store = InMemoryBlobStore::new();
        let url = store
            .put("netflix-catalogs", "x.txt", Bytes::from_static(b"hello"))
            .await
            .unwrap();
        assert_eq!(url, "memory://netflix-catalogs/x.txt");

        store
            .put("netflix-catalogs", "x.txt", Bytes::from_static(b"world"))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get("netflix-catalogs", "x.txt").await.unwrap(),
            Bytes::from_static(b"world")
        );
        assert!(store.get("videos", "x.txt").await.is_none());
    }
}
