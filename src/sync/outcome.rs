//! Result types reported by the sync workflow.

use crate::reconcile::ReconciliationStats;
use crate::types::CollectionUid;
use serde::Serialize;

/// What happened to one registry entry during `sync_all`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Unchanged,
    Updated {
        collection_uid: CollectionUid,
        stats: ReconciliationStats,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySyncResult {
    pub link: String,
    pub previous_uid: CollectionUid,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

/// Summary of a `sync_all` run, one result per entry in registry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub results: Vec<EntrySyncResult>,
}

impl SyncReport {
    pub fn push(&mut self, link: String, previous_uid: CollectionUid, outcome: EntryOutcome) {
        self.results.push(EntrySyncResult {
            link,
            previous_uid,
            outcome,
        });
    }

    pub fn unchanged_count(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Unchanged))
    }

    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Updated { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Result of registering a link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddLinkOutcome {
    /// The link is now registered against `collection_uid`. `stats` is set
    /// when scripts were carried over from an existing collection.
    Registered {
        collection_uid: CollectionUid,
        stats: Option<ReconciliationStats>,
    },
    AlreadyRegistered,
}
