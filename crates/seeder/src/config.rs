//! Seeder configuration.
//!
//! | Env Var                         | Default     |
//! |---------------------------------|-------------|
//! | `BLOB_STORE_CONNECTION_STRING`  | (required)  |
//! | `DOCUMENT_STORE_ENDPOINT`       | (required)  |
//! | `DOCUMENT_STORE_KEY`            | (required)  |
//! | `CATALOG_API_URL`               | (required)  |
//! | `DOCUMENT_STORE_DATABASE`       | `NetflixDB` |
//! | `DOCUMENT_STORE_CONTAINER`      | `movies`    |
//! | `SEED_ASSETS_DIR`               | `./assets`  |
//! | `CATALOG_STORE_BACKEND`         | `remote`    |
//!
//! With `CATALOG_STORE_BACKEND=memory` the store credentials are not
//! required; `CATALOG_API_URL` always is.

use std::path::PathBuf;

use catalog_core::env::{EnvError, EnvReader};
use catalog_store::{BlobStoreConfig, DocumentStoreConfig, StoreBackend, Stores};

use crate::error::SeedError;
use crate::samples::DEFAULT_SEED_CONTAINER;

pub const ENV_API_URL: &str = "CATALOG_API_URL";
pub const ENV_ASSETS_DIR: &str = "SEED_ASSETS_DIR";

/// Asset root used when `SEED_ASSETS_DIR` is unset.
pub const DEFAULT_ASSETS_DIR: &str = "./assets";

/// Store settings for the selected backend.
#[derive(Debug, Clone)]
pub enum StoreSettings {
    Remote {
        documents: DocumentStoreConfig,
        blobs: BlobStoreConfig,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub stores: StoreSettings,
    /// Base URL of the catalog API, echoed in the post-run guidance.
    pub api_url: String,
    pub assets_dir: PathBuf,
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, EnvError> {
        Self::read(EnvReader::process())
    }

    /// Read every setting, reporting all missing variables together.
    pub fn read(mut env: EnvReader<'_>) -> Result<Self, EnvError> {
        let stores = match StoreBackend::read(&env)? {
            StoreBackend::Remote => {
                let blobs = BlobStoreConfig::read(&mut env);
                let documents = DocumentStoreConfig::read(&mut env, DEFAULT_SEED_CONTAINER);
                StoreSettings::Remote { documents, blobs }
            }
            StoreBackend::Memory => StoreSettings::Memory,
        };
        let api_url = env.required(ENV_API_URL);
        let assets_dir = PathBuf::from(env.or_default(ENV_ASSETS_DIR, DEFAULT_ASSETS_DIR));
        env.finish()?;

        Ok(Self {
            stores,
            api_url,
            assets_dir,
        })
    }

    /// Build the store clients for the configured backend.
    pub fn connect(&self) -> Result<Stores, SeedError> {
        match &self.stores {
            StoreSettings::Remote { documents, blobs } => Ok(Stores::remote(documents, blobs)?),
            StoreSettings::Memory => Ok(Stores::in_memory()),
        }
    }
}
