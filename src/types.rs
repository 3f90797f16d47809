//! Core types shared across the collection, reconcile and sync layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CollectionUid: Postman's identifier for a stored collection
pub type CollectionUid = String;

/// Identity of an endpoint: `"<METHOD> <raw url>"`.
///
/// Compared byte for byte. Query order, trailing slashes and path-parameter
/// placeholders are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointKey(String);

impl EndpointKey {
    pub fn new(method: &str, raw_url: &str) -> Self {
        EndpointKey(format!("{} {}", method, raw_url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for EndpointKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EndpointKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
