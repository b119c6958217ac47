//! Batch seeding of the catalog: sample media uploads plus a fixed set of
//! sample records upserted into the document store.
//!
//! The binary (`main.rs`) wires configuration, the confirmation prompt and
//! the stores together; everything else lives here so it can be driven
//! against in-memory stores in tests.

pub mod assets;
pub mod config;
pub mod error;
pub mod prompt;
pub mod run;
pub mod samples;
