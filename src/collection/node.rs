//! Collection node types and EndpointKey derivation

use crate::error::ApiError;
use crate::types::EndpointKey;
use serde_json::{Map, Value};

pub(crate) const ITEM_FIELD: &str = "item";
const REQUEST_FIELD: &str = "request";
const EVENT_FIELD: &str = "event";
const NAME_FIELD: &str = "name";

/// Folder node representation
///
/// `fields` holds every field of the source object. The `item` slot stays in
/// place (as `null`) so the rendered folder keeps its original field order.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderNode {
    pub children: Vec<CollectionNode>,
    fields: Map<String, Value>,
}

/// Request node representation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestNode {
    key: EndpointKey,
    fields: Map<String, Value>,
}

/// Collection node type
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionNode {
    Folder(FolderNode),
    Request(RequestNode),
    /// Neither `item` nor `request`; carried through untouched
    Unrecognized(Value),
}

impl CollectionNode {
    /// Classify a raw JSON node. `path` locates the node in error messages.
    ///
    /// `item` is checked before `request`, so a node carrying both is a folder.
    pub fn from_value(value: Value, path: &str) -> Result<Self, ApiError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Ok(CollectionNode::Unrecognized(other)),
        };

        if let Some(slot) = fields.get_mut(ITEM_FIELD) {
            let children = match slot.take() {
                Value::Array(items) => parse_items(items, &format!("{}.item", path))?,
                other => {
                    return Err(ApiError::InvalidCollection(format!(
                        "{}: `item` must be an array, found {}",
                        path,
                        value_kind(&other)
                    )))
                }
            };
            return Ok(CollectionNode::Folder(FolderNode { children, fields }));
        }

        match fields.get(REQUEST_FIELD) {
            Some(request) => {
                let key = endpoint_key(request, path)?;
                Ok(CollectionNode::Request(RequestNode { key, fields }))
            }
            None => Ok(CollectionNode::Unrecognized(Value::Object(fields))),
        }
    }

    /// Render back to JSON.
    pub fn to_value(&self) -> Value {
        match self {
            CollectionNode::Folder(folder) => folder.to_value(),
            CollectionNode::Request(request) => Value::Object(request.fields.clone()),
            CollectionNode::Unrecognized(value) => value.clone(),
        }
    }
}

/// Parse an `item` array into nodes.
pub fn parse_items(items: Vec<Value>, path: &str) -> Result<Vec<CollectionNode>, ApiError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| CollectionNode::from_value(item, &format!("{}[{}]", path, i)))
        .collect()
}

/// Render a node sequence back into an `item` array.
pub fn render_items(nodes: &[CollectionNode]) -> Value {
    Value::Array(nodes.iter().map(CollectionNode::to_value).collect())
}

impl FolderNode {
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_FIELD).and_then(Value::as_str)
    }

    fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        // replaces the placeholder in its original position
        fields.insert(ITEM_FIELD.to_string(), render_items(&self.children));
        Value::Object(fields)
    }
}

impl RequestNode {
    pub fn key(&self) -> &EndpointKey {
        &self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// The node's `event` value, if it has one.
    pub fn events(&self) -> Option<&Value> {
        self.fields.get(EVENT_FIELD)
    }

    pub fn event_count(&self) -> usize {
        self.events().and_then(Value::as_array).map_or(0, Vec::len)
    }

    /// The `event` value to copy onto a matching endpoint: this node's own,
    /// or an empty sequence when it has none.
    pub fn events_or_empty(&self) -> Value {
        self.events()
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// Replace the `event` value wholesale.
    pub fn set_events(&mut self, events: Value) {
        self.fields.insert(EVENT_FIELD.to_string(), events);
    }
}

/// Derive `"<method> <raw url>"` from a `request` object.
///
/// `url` may be an object carrying `raw` or a bare string.
fn endpoint_key(request: &Value, path: &str) -> Result<EndpointKey, ApiError> {
    let invalid = |what: &str| {
        ApiError::InvalidCollection(format!("{}: request {}", path, what))
    };

    let request = request
        .as_object()
        .ok_or_else(|| invalid("must be an object"))?;
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("has no string `method`"))?;
    let raw = match request.get("url") {
        Some(Value::String(raw)) => raw.as_str(),
        Some(Value::Object(url)) => url
            .get("raw")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("url has no string `raw`"))?,
        _ => return Err(invalid("has no `url`")),
    };

    Ok(EndpointKey::new(method, raw))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
