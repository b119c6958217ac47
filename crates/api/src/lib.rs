//! Catalog API server library.
//!
//! Exposes the configuration, state, error handling and routes so that
//! integration tests, the console's end-to-end tests and the binary
//! entrypoint all build the same router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
