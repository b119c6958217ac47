use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use catalog_core::catalog::require_param;

use crate::error::AppResult;
use crate::query::UploadParams;
use crate::response::UploadResponse;
use crate::state::AppState;

/// POST /api/upload_file?filename=
///
/// Stores the raw request body under `filename` in the upload container,
/// replacing any blob of the same name. An empty body is accepted.
pub async fn upload_file(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(filename = ?params.filename, "Upload requested");
    let filename = require_param("filename", params.filename.as_deref())?;
    let container = state.config.upload_container.as_str();
    let size = body.len();

    let url = state.blobs.put(container, &filename, body).await?;

    tracing::info!(%filename, container, size, "File uploaded");

    Ok(Json(UploadResponse {
        message: format!("File {filename} uploaded successfully"),
        url,
    }))
}
