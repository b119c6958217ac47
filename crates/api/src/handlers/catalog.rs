//! Handlers for catalog records.
//!
//! Bodies are passed through as schemaless documents; only the presence
//! of `id` is checked before the store sees them.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use catalog_core::catalog::{document_id, parse_catalog_body, require_param};
use catalog_core::error::CoreError;

use crate::error::AppResult;
use crate::query::CatalogIdParams;
use crate::response::{CatalogListResponse, CatalogResponse, SavedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/save_catalog
///
/// Create a new record. An existing id is reported by the store and the
/// stored record is left unchanged.
pub async fn save_catalog(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(size = body.len(), "Save catalog requested");
    let doc = parse_catalog_body(&body)?;
    let id = document_id(&doc)?.to_string();

    state.documents.create(doc).await?;

    tracing::info!(catalog_id = %id, "Catalog saved");

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            message: "Catalog saved successfully",
            id,
        }),
    ))
}

/// GET /api/list_catalogs
pub async fn list_catalogs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::debug!("List catalogs requested");
    let catalogs = state.documents.list_all().await?;
    tracing::debug!(count = catalogs.len(), "Listed catalogs");
    Ok(Json(CatalogListResponse { catalogs }))
}

/// GET /api/get_catalog?id=
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogIdParams>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id = ?params.id, "Get catalog requested");
    let id = require_param("id", params.id.as_deref())?;

    let catalog = state
        .documents
        .get_by_id(&id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Catalog",
            id,
        })?;

    Ok(Json(CatalogResponse { catalog }))
}
