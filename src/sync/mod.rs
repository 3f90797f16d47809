//! Sync Workflow
//!
//! Keeps each registered collection in step with its spec: when a spec's hash
//! changes, a fresh collection is imported from it, the test scripts of the
//! current collection are carried over, and the result is published as a new
//! collection whose UID replaces the old one in the registry.

pub mod outcome;
pub mod service;

pub use outcome::{AddLinkOutcome, EntryOutcome, EntrySyncResult, SyncReport};
pub use service::SyncService;
