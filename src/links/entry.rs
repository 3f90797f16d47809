//! A single registry record.

use crate::types::CollectionUid;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub link: String,

    /// SHA-256 of the spec the current collection was generated from
    pub hash: String,

    #[serde(rename = "Collection UID")]
    pub collection_uid: CollectionUid,

    #[serde(rename = "Last Date Updated")]
    pub last_updated: String,

    /// Fields this tool does not manage, kept as found
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinkEntry {
    pub fn new(link: impl Into<String>, hash: impl Into<String>, uid: impl Into<CollectionUid>) -> Self {
        Self {
            link: link.into(),
            hash: hash.into(),
            collection_uid: uid.into(),
            last_updated: now_timestamp(),
            extra: Map::new(),
        }
    }

    /// Point the entry at a freshly built collection.
    pub fn record_update(&mut self, uid: impl Into<CollectionUid>, hash: impl Into<String>) {
        self.collection_uid = uid.into();
        self.hash = hash.into();
        self.last_updated = now_timestamp();
    }
}

pub fn now_timestamp() -> String {
    format_timestamp(chrono::Local::now().naive_local())
}

/// ISO 8601 local time as written to `Last Date Updated`. The fraction is six
/// digits of microseconds and is left off entirely when they are zero.
pub fn format_timestamp(time: NaiveDateTime) -> String {
    let seconds = time.format("%Y-%m-%dT%H:%M:%S");
    // Leap seconds carry nanosecond() >= 1e9; clamp into the same second.
    let micros = (time.nanosecond() / 1_000).min(999_999);
    if micros == 0 {
        seconds.to_string()
    } else {
        format!("{}.{:06}", seconds, micros)
    }
}
