use catalog_core::env::EnvError;
use catalog_core::error::StoreError;

/// Failures that abort a seeding run. Per-item upload and upsert failures
/// are not errors at this level; they are counted in the run report.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Failed to initialize stores: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
