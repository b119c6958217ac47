use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Catalog and upload routes, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload_file",
            post(handlers::upload::upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/save_catalog", post(handlers::catalog::save_catalog))
        .route("/list_catalogs", get(handlers::catalog::list_catalogs))
        .route("/get_catalog", get(handlers::catalog::get_catalog))
}
