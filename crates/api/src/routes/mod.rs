pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /upload_file?filename=        store the raw request body as a blob (POST)
/// /save_catalog                 create a catalog record (POST)
/// /list_catalogs                every catalog record (GET)
/// /get_catalog?id=              one catalog record (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(catalog::router())
}
