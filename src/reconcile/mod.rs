//! Endpoint Reconciler
//!
//! Carries event annotations (test scripts) from an old collection onto the
//! structurally matching endpoints of a regenerated one. Two passes: index
//! the old tree by EndpointKey, then walk the new tree replacing `event` on
//! every request whose key was indexed.

pub mod index;
pub mod merge;
pub mod stats;

pub use index::{build_index, EndpointIndex};
pub use merge::merge_events;
pub use stats::ReconciliationStats;

use crate::collection::CollectionDocument;
use crate::error::ApiError;
use std::path::Path;
use tracing::info;

/// Reconcile `new` against `old`, returning the updated document and stats.
///
/// `new` is consumed and handed back so the caller always holds the only
/// copy of the merged tree.
pub fn reconcile(
    old: &CollectionDocument,
    mut new: CollectionDocument,
) -> (CollectionDocument, ReconciliationStats) {
    let index = build_index(old.items());
    info!(endpoints = index.len(), "Extracted endpoints from the old collection");

    let mut stats = ReconciliationStats::new(index.len());
    let updated = merge_events(new.items_mut(), &index, &mut stats);
    info!(updated, events = stats.updated_events_count, "Updated endpoints in the new collection");

    (new, stats)
}

/// Read two collection files, reconcile them and write the result.
///
/// Nothing is written when either input fails to parse.
pub fn reconcile_files(
    old_path: &Path,
    new_path: &Path,
    output_path: &Path,
) -> Result<ReconciliationStats, ApiError> {
    let old = CollectionDocument::read(old_path)?;
    let new = CollectionDocument::read(new_path)?;

    let (updated, stats) = reconcile(&old, new);
    updated.write(output_path)?;
    info!(path = %output_path.display(), "Saved updated collection");

    Ok(stats)
}
