//! Links Registry
//!
//! `links.json` maps each spec URL to the Postman collection generated from
//! it, plus the hash of the spec that collection was built from.

pub mod entry;
pub mod registry;

pub use entry::{format_timestamp, now_timestamp, LinkEntry};
pub use registry::LinkRegistry;
