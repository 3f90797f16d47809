//! OpenAPI/Swagger documents: download, shape check, change hash.

use crate::error::ApiError;
use crate::json::to_canonical_string;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Where spec documents come from.
#[async_trait]
pub trait SpecSource: Send + Sync {
    async fn fetch_spec(&self, url: &str) -> Result<Value, ApiError>;
}

/// Plain HTTP GET.
pub struct HttpSpecSource {
    client: Client,
}

impl HttpSpecSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpSpecSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpecSource for HttpSpecSource {
    async fn fetch_spec(&self, url: &str) -> Result<Value, ApiError> {
        tracing::debug!(url, "Downloading spec");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::SpecDownload {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

/// A spec must be an object with a top-level `openapi` or `swagger` field.
pub fn validate_spec(spec: &Value) -> Result<(), ApiError> {
    let object = spec
        .as_object()
        .ok_or_else(|| ApiError::InvalidSpec("document is not a JSON object".to_string()))?;
    if object.contains_key("openapi") || object.contains_key("swagger") {
        Ok(())
    } else {
        Err(ApiError::InvalidSpec(
            "missing 'openapi' or 'swagger' version field".to_string(),
        ))
    }
}

/// SHA-256 over the canonical text, lowercase hex.
///
/// Hashes recorded in existing registries were computed over the same
/// canonical text, so they keep matching.
pub fn hash_spec(spec: &Value) -> Result<String, ApiError> {
    let digest = Sha256::digest(to_canonical_string(spec)?.as_bytes());
    Ok(hex::encode(digest))
}
