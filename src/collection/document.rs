//! Whole-document wrapper around a collection export.
//!
//! Accepts the shape served by `GET /collections/{uid}` and written by the
//! export tooling: `{ "collection": { "item": [ ... ], ... }, ... }`.

use super::node::{parse_items, render_items, CollectionNode, ITEM_FIELD};
use crate::error::ApiError;
use serde_json::{Map, Value};
use std::path::Path;

const COLLECTION_FIELD: &str = "collection";

/// Parsed collection document. Owns its tree exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDocument {
    /// Top-level object; `collection.item` holds a placeholder while parsed
    root: Map<String, Value>,
    items: Vec<CollectionNode>,
}

impl CollectionDocument {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let mut root = match value {
            Value::Object(root) => root,
            _ => {
                return Err(ApiError::InvalidCollection(
                    "document must be a JSON object".to_string(),
                ))
            }
        };

        let collection = root
            .get_mut(COLLECTION_FIELD)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                ApiError::InvalidCollection("document has no `collection` object".to_string())
            })?;
        let items = match collection.get_mut(ITEM_FIELD).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::InvalidCollection(
                    "collection has no `item` array".to_string(),
                ))
            }
        };
        let items = parse_items(items, "collection.item")?;

        Ok(Self { root, items })
    }

    pub fn from_json_str(text: &str) -> Result<Self, ApiError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self, ApiError> {
        Self::from_value(crate::json::read_value(path)?)
    }

    /// Write the document with four-space indentation.
    pub fn write(&self, path: &Path) -> Result<(), ApiError> {
        crate::json::write_indented(path, &self.to_value())
    }

    pub fn items(&self) -> &[CollectionNode] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [CollectionNode] {
        &mut self.items
    }

    /// Collection name from `collection.info.name`, when present.
    pub fn name(&self) -> Option<&str> {
        self.root
            .get(COLLECTION_FIELD)?
            .get("info")?
            .get("name")?
            .as_str()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.render_root())
    }

    /// The rendered `collection` object alone, as the create endpoint expects.
    pub fn collection_body(&self) -> Value {
        self.render_root()
            .remove(COLLECTION_FIELD)
            .unwrap_or(Value::Null)
    }

    fn render_root(&self) -> Map<String, Value> {
        let mut root = self.root.clone();
        if let Some(collection) = root
            .get_mut(COLLECTION_FIELD)
            .and_then(Value::as_object_mut)
        {
            collection.insert(ITEM_FIELD.to_string(), render_items(&self.items));
        }
        root
    }
}
