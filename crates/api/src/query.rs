//! Query parameter types for the catalog handlers.
//!
//! Required parameters are declared optional here so that a missing
//! value reaches the handler and is reported as a validation error
//! instead of an extractor rejection.

use serde::Deserialize;

/// `?filename=` for file uploads.
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
}

/// `?id=` for single-record lookups.
#[derive(Debug, Deserialize)]
pub struct CatalogIdParams {
    pub id: Option<String>,
}
