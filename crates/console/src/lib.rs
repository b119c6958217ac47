//! Browser console for the catalog API.
//!
//! Serves a single server-rendered page with four panels (upload, save,
//! list, search). Every action is forwarded to the catalog API over HTTP
//! through [`client::CatalogApiClient`]; the console holds no data itself.

pub mod client;
pub mod config;
pub mod routes;
pub mod templates;
