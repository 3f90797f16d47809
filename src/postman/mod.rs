//! Postman API
//!
//! The sync workflow only talks to Postman through [`CollectionApi`], so tests
//! can swap in an in-memory implementation.

pub mod client;
pub mod response;

pub use client::PostmanClient;

use crate::error::ApiError;
use crate::types::CollectionUid;
use async_trait::async_trait;
use serde_json::Value;

/// Collection operations used by sync.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Full collection envelope: `{"collection": {...}}`.
    async fn fetch_collection(&self, uid: &str) -> Result<Value, ApiError>;

    async fn delete_collection(&self, uid: &str) -> Result<(), ApiError>;

    /// Import an OpenAPI/Swagger document, returning the new collection's UID.
    async fn import_openapi(&self, spec: &Value) -> Result<CollectionUid, ApiError>;

    /// Create a collection from a `collection` body, returning its UID.
    async fn create_collection(&self, collection: &Value) -> Result<CollectionUid, ApiError>;
}
