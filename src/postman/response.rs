//! UID extraction from Postman response bodies.

use crate::error::ApiError;
use crate::types::CollectionUid;
use serde_json::Value;

/// `collections[0].uid` from an import response.
pub fn imported_uid(body: &Value) -> Result<CollectionUid, ApiError> {
    body.get("collections")
        .and_then(Value::as_array)
        .and_then(|collections| collections.first())
        .and_then(|first| first.get("uid"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ApiError::MissingCollectionUid)
}

/// `collection.uid` from a create response.
pub fn created_uid(body: &Value) -> Result<CollectionUid, ApiError> {
    body.get("collection")
        .and_then(|collection| collection.get("uid"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ApiError::MissingCollectionUid)
}
