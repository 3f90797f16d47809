//! reqwest-backed Postman client.

use super::response::{created_uid, imported_uid};
use super::CollectionApi;
use crate::error::ApiError;
use crate::types::CollectionUid;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

const API_KEY_HEADER: &str = "X-Api-Key";

pub struct PostmanClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostmanClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map anything other than 200 to `PostmanApi`, otherwise parse the body.
    async fn json_body(response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::PostmanApi {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl CollectionApi for PostmanClient {
    async fn fetch_collection(&self, uid: &str) -> Result<Value, ApiError> {
        debug!(uid, "Fetching collection");
        let response = self
            .client
            .get(self.url(&format!("/collections/{}", uid)))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        Self::json_body(response).await
    }

    async fn delete_collection(&self, uid: &str) -> Result<(), ApiError> {
        debug!(uid, "Deleting collection");
        let response = self
            .client
            .delete(self.url(&format!("/collections/{}", uid)))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        Self::json_body(response).await.map(|_| ())
    }

    async fn import_openapi(&self, spec: &Value) -> Result<CollectionUid, ApiError> {
        debug!("Importing OpenAPI document");
        let response = self
            .client
            .post(self.url("/import/openapi"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({"type": "json", "input": spec}))
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        imported_uid(&body)
    }

    async fn create_collection(&self, collection: &Value) -> Result<CollectionUid, ApiError> {
        debug!("Creating collection");
        let response = self
            .client
            .post(self.url("/collections"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({"collection": collection}))
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        created_uid(&body)
    }
}
