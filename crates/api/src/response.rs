//! Response bodies returned by the catalog handlers.

use serde::Serialize;

use catalog_core::catalog::Document;

/// `{ "message": ..., "url": ... }` after a file upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
}

/// `{ "message": ..., "id": ... }` after a record is created.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub message: &'static str,
    pub id: String,
}

/// `{ "catalogs": [...] }`
#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    pub catalogs: Vec<Document>,
}

/// `{ "catalog": {...} }`
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub catalog: Document,
}
