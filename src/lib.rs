//! postman-sync: keep Postman collections in step with their OpenAPI specs
//!
//! Regenerating a collection from a changed spec throws away the test scripts
//! attached to its requests. This crate re-imports the spec, carries every
//! script across to the endpoint with the same method and URL, and publishes
//! the result, tracking which spec produced which collection in a small JSON
//! registry.

pub mod collection;
pub mod config;
pub mod credentials;
pub mod error;
pub mod json;
pub mod links;
pub mod logging;
pub mod postman;
pub mod reconcile;
pub mod spec;
pub mod sync;
pub mod tooling;
pub mod types;
