//! Domain types and store capabilities shared by the catalog service,
//! the seeding CLI and the console.

pub mod catalog;
pub mod env;
pub mod error;
pub mod store;
