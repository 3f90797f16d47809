//! Event merge pass over the new collection.

use super::index::EndpointIndex;
use super::stats::ReconciliationStats;
use crate::collection::CollectionNode;
use tracing::{debug, info};

/// Copy events from indexed old endpoints onto matching nodes of `tree`.
///
/// Matched nodes get their `event` replaced wholesale (an empty sequence when
/// the old node had none). Unmatched nodes are left exactly as they were.
/// Returns the number of nodes updated.
pub fn merge_events(
    tree: &mut [CollectionNode],
    index: &EndpointIndex<'_>,
    stats: &mut ReconciliationStats,
) -> usize {
    let mut updated = 0;
    for node in tree.iter_mut() {
        match node {
            CollectionNode::Folder(folder) => {
                updated += merge_events(&mut folder.children, index, stats);
            }
            CollectionNode::Request(request) => {
                let Some(old) = index.get(request.key()) else {
                    continue;
                };
                request.set_events(old.events_or_empty());
                updated += 1;
                stats.record_match(request.key().clone(), request.event_count());
                info!(endpoint = %request.key(), events = request.event_count(), "Updated events for endpoint");
            }
            CollectionNode::Unrecognized(_) => {
                stats.record_skipped();
                debug!("Skipping node that is neither folder nor request");
            }
        }
    }
    updated
}
