use async_trait::async_trait;
use parking_lot::Mutex;
use postman_sync::error::ApiError;
use postman_sync::postman::CollectionApi;
use postman_sync::spec::SpecSource;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Build an OpenAPI document with one operation per `(method, path)`.
pub fn openapi_spec(title: &str, operations: &[(&str, &str)]) -> Value {
    let mut paths = Map::new();
    for (method, path) in operations {
        let entry = paths
            .entry(path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        entry[method.to_lowercase()] = json!({"summary": format!("{} {}", method, path)});
    }
    json!({
        "openapi": "3.0.0",
        "info": {"title": title, "version": "1.0.0"},
        "paths": paths,
    })
}

/// A request item as Postman would export it.
pub fn request_item(method: &str, raw: &str, events: Option<Value>) -> Value {
    let mut item = json!({
        "name": format!("{} {}", method, raw),
        "request": {"method": method, "url": {"raw": raw, "host": ["{{baseUrl}}"]}},
        "response": []
    });
    if let Some(events) = events {
        item["event"] = events;
    }
    item
}

pub fn test_script(source: &str) -> Value {
    json!([{"listen": "test", "script": {"type": "text/javascript", "exec": [source]}}])
}

pub fn collection_envelope(name: &str, items: Vec<Value>) -> Value {
    json!({"collection": {"info": {"name": name, "schema": "v2.1.0"}, "item": items}})
}

#[derive(Default)]
struct FakeState {
    collections: HashMap<String, Value>,
    next_id: usize,
    imports: usize,
    deleted: Vec<String>,
    created: Vec<String>,
}

/// In-memory Postman: imports turn every spec path into a request item.
#[derive(Default)]
pub struct FakePostman {
    state: Mutex<FakeState>,
}

impl FakePostman {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a collection envelope under a fixed UID.
    pub fn insert(&self, uid: &str, envelope: Value) {
        self.state.lock().collections.insert(uid.to_string(), envelope);
    }

    pub fn get(&self, uid: &str) -> Option<Value> {
        self.state.lock().collections.get(uid).cloned()
    }

    pub fn imports(&self) -> usize {
        self.state.lock().imports
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().deleted.clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.state.lock().created.clone()
    }

    fn store(state: &mut FakeState, envelope: Value) -> String {
        state.next_id += 1;
        let uid = format!("fake-{}", state.next_id);
        state.collections.insert(uid.clone(), envelope);
        uid
    }
}

#[async_trait]
impl CollectionApi for FakePostman {
    async fn fetch_collection(&self, uid: &str) -> Result<Value, ApiError> {
        self.get(uid).ok_or_else(|| ApiError::PostmanApi {
            status: 404,
            body: format!("collection {} not found", uid),
        })
    }

    async fn delete_collection(&self, uid: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        match state.collections.remove(uid) {
            Some(_) => {
                state.deleted.push(uid.to_string());
                Ok(())
            }
            None => Err(ApiError::PostmanApi {
                status: 404,
                body: format!("collection {} not found", uid),
            }),
        }
    }

    async fn import_openapi(&self, spec: &Value) -> Result<String, ApiError> {
        let title = spec["info"]["title"].as_str().unwrap_or("Imported").to_string();
        let mut items = Vec::new();
        if let Some(paths) = spec["paths"].as_object() {
            for (path, operations) in paths {
                if let Some(operations) = operations.as_object() {
                    for method in operations.keys() {
                        let raw = format!("{{{{baseUrl}}}}{}", path);
                        items.push(request_item(&method.to_uppercase(), &raw, Some(json!([]))));
                    }
                }
            }
        }
        let mut state = self.state.lock();
        state.imports += 1;
        Ok(Self::store(&mut state, collection_envelope(&title, items)))
    }

    async fn create_collection(&self, collection: &Value) -> Result<String, ApiError> {
        let mut state = self.state.lock();
        let uid = Self::store(&mut state, json!({"collection": collection}));
        state.created.push(uid.clone());
        Ok(uid)
    }
}

/// Spec documents served from memory by URL.
#[derive(Default)]
pub struct FakeSpecs {
    documents: Mutex<HashMap<String, Value>>,
}

impl FakeSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, spec: Value) {
        self.documents.lock().insert(url.to_string(), spec);
    }
}

#[async_trait]
impl SpecSource for FakeSpecs {
    async fn fetch_spec(&self, url: &str) -> Result<Value, ApiError> {
        self.documents
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::SpecDownload {
                url: url.to_string(),
                status: 404,
                body: "not found".to_string(),
            })
    }
}
