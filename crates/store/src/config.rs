//! Store settings read from the environment and the factory that turns
//! them into trait objects.
//!
//! | Env Var                         | Default     |
//! |---------------------------------|-------------|
//! | `CATALOG_STORE_BACKEND`         | `remote`    |
//! | `DOCUMENT_STORE_ENDPOINT`       | (required)  |
//! | `DOCUMENT_STORE_KEY`            | (required)  |
//! | `DOCUMENT_STORE_DATABASE`       | `NetflixDB` |
//! | `DOCUMENT_STORE_CONTAINER`      | per caller  |
//! | `BLOB_STORE_CONNECTION_STRING`  | (required)  |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use catalog_core::env::{EnvError, EnvReader};
use catalog_core::error::StoreError;
use catalog_core::store::{BlobStore, DocumentStore};

use crate::blob::AzureBlobStore;
use crate::cosmos::CosmosDocumentStore;
use crate::memory::{InMemoryBlobStore, InMemoryDocumentStore};

pub const ENV_BACKEND: &str = "CATALOG_STORE_BACKEND";
pub const ENV_DOCUMENT_ENDPOINT: &str = "DOCUMENT_STORE_ENDPOINT";
pub const ENV_DOCUMENT_KEY: &str = "DOCUMENT_STORE_KEY";
pub const ENV_DOCUMENT_DATABASE: &str = "DOCUMENT_STORE_DATABASE";
pub const ENV_DOCUMENT_CONTAINER: &str = "DOCUMENT_STORE_CONTAINER";
pub const ENV_BLOB_CONNECTION_STRING: &str = "BLOB_STORE_CONNECTION_STRING";

/// Database used when `DOCUMENT_STORE_DATABASE` is unset.
pub const DEFAULT_DATABASE: &str = "NetflixDB";

/// Where the document collection lives.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentStoreConfig {
    pub endpoint: String,
    /// Base64 master key.
    pub key: String,
    pub database: String,
    pub container: String,
}

impl DocumentStoreConfig {
    /// Read the document store settings. `default_container` applies when
    /// `DOCUMENT_STORE_CONTAINER` is unset.
    pub fn read(env: &mut EnvReader<'_>, default_container: &str) -> Self {
        Self {
            endpoint: env.required(ENV_DOCUMENT_ENDPOINT),
            key: env.required(ENV_DOCUMENT_KEY),
            database: env.or_default(ENV_DOCUMENT_DATABASE, DEFAULT_DATABASE),
            container: env.or_default(ENV_DOCUMENT_CONTAINER, default_container),
        }
    }
}

impl fmt::Debug for DocumentStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStoreConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .field("database", &self.database)
            .field("container", &self.container)
            .finish()
    }
}

/// Credentials for the blob account.
#[derive(Clone, PartialEq, Eq)]
pub struct BlobStoreConfig {
    pub connection_string: String,
}

impl BlobStoreConfig {
    pub fn read(env: &mut EnvReader<'_>) -> Self {
        Self {
            connection_string: env.required(ENV_BLOB_CONNECTION_STRING),
        }
    }
}

impl fmt::Debug for BlobStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStoreConfig")
            .field("connection_string", &"<redacted>")
            .finish()
    }
}

/// Which store implementations to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// The managed document and blob services.
    Remote,
    /// Process-local stores; nothing survives a restart.
    Memory,
}

impl StoreBackend {
    pub fn read(env: &EnvReader<'_>) -> Result<Self, EnvError> {
        env.parsed_or(ENV_BACKEND, Self::Remote)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store backend '{other}'. Must be one of: remote, memory"
            )),
        }
    }
}

/// The pair of store clients handed to handlers and the seeder.
#[derive(Clone)]
pub struct Stores {
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            documents: Arc::new(InMemoryDocumentStore::new()),
            blobs: Arc::new(InMemoryBlobStore::new()),
        }
    }

    /// Clients for the managed services, sharing one HTTP connection pool.
    pub fn remote(
        documents: &DocumentStoreConfig,
        blobs: &BlobStoreConfig,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::new();
        let document_store = CosmosDocumentStore::with_client(client.clone(), documents)?;
        let blob_store = AzureBlobStore::new(client, blobs.connection_string.parse()?)?;
        Ok(Self {
            documents: Arc::new(document_store),
            blobs: Arc::new(blob_store),
        })
    }
}
