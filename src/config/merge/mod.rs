//! Config composition: source ordering and deserialization.

mod merge_policy;
pub mod service;

pub use service::MergeService;
