//! Endpoint Index
//!
//! Lookup from EndpointKey to the request node that last carried it in the
//! old collection.

use crate::collection::{CollectionNode, RequestNode};
use crate::types::EndpointKey;
use std::collections::HashMap;

/// Index: EndpointKey -> request node in the old tree
///
/// Borrows the tree it was built from, so the old document must outlive the
/// merge. Read-only once built.
#[derive(Debug, Default)]
pub struct EndpointIndex<'a> {
    entries: HashMap<EndpointKey, &'a RequestNode>,
}

impl<'a> EndpointIndex<'a> {
    /// Pre-order walk over `tree`. On duplicate keys the node visited last wins.
    pub fn build(tree: &'a [CollectionNode]) -> Self {
        let mut index = EndpointIndex {
            entries: HashMap::new(),
        };
        index.insert_all(tree);
        index
    }

    fn insert_all(&mut self, nodes: &'a [CollectionNode]) {
        for node in nodes {
            match node {
                CollectionNode::Folder(folder) => self.insert_all(&folder.children),
                CollectionNode::Request(request) => {
                    self.entries.insert(request.key().clone(), request);
                }
                CollectionNode::Unrecognized(_) => {}
            }
        }
    }

    pub fn get(&self, key: &EndpointKey) -> Option<&'a RequestNode> {
        self.entries.get(key).copied()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &EndpointKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed keys in sorted order
    #[cfg(test)]
    pub fn keys(&self) -> Vec<&EndpointKey> {
        let mut keys: Vec<&EndpointKey> = self.entries.keys().collect();
        keys.sort();
        keys
    }
}

/// Build the index for an old collection's top-level items.
pub fn build_index(tree: &[CollectionNode]) -> EndpointIndex<'_> {
    EndpointIndex::build(tree)
}
