//! Store clients for the catalog service.
//!
//! Implements the `catalog_core::store` capabilities against the managed
//! document and blob services over their REST APIs, and provides
//! in-memory equivalents for local runs and tests.

pub mod blob;
pub mod config;
pub mod connection_string;
pub mod cosmos;
mod http;
pub mod memory;
pub mod signing;

pub use blob::AzureBlobStore;
pub use config::{BlobStoreConfig, DocumentStoreConfig, StoreBackend, Stores};
pub use cosmos::CosmosDocumentStore;
pub use memory::{InMemoryBlobStore, InMemoryDocumentStore};
