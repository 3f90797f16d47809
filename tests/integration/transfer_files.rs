use postman_sync::collection::CollectionDocument;
use postman_sync::error::ApiError;
use postman_sync::reconcile::{build_index, merge_events, reconcile, reconcile_files, ReconciliationStats};
use postman_sync::types::EndpointKey;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn old_collection() -> Value {
    json!({
        "collection": {
            "item": [
                {
                    "name": "Endpoint 1",
                    "request": {"method": "GET", "url": {"raw": "/endpoint1"}},
                    "event": [{"listen": "test", "script": {"exec": ["console.log(\"test1\")"]}}]
                }
            ]
        }
    })
}

fn new_collection() -> Value {
    json!({
        "collection": {
            "item": [
                {
                    "name": "Endpoint 1",
                    "request": {"method": "GET", "url": {"raw": "/endpoint1"}},
                    "event": []
                },
                {
                    "name": "Endpoint 2",
                    "request": {"method": "POST", "url": {"raw": "/endpoint2"}},
                    "event": []
                }
            ]
        }
    })
}

#[test]
fn index_contains_old_endpoint() {
    let old = CollectionDocument::from_value(old_collection()).unwrap();
    let index = build_index(old.items());
    assert_eq!(index.len(), 1);
    let request = index.get(&EndpointKey::new("GET", "/endpoint1")).unwrap();
    assert_eq!(request.name(), Some("Endpoint 1"));
}

#[test]
fn merge_reports_single_match() {
    let old = CollectionDocument::from_value(old_collection()).unwrap();
    let mut new = CollectionDocument::from_value(new_collection()).unwrap();
    let index = build_index(old.items());
    let mut stats = ReconciliationStats::new(index.len());

    let updated = merge_events(new.items_mut(), &index, &mut stats);

    assert_eq!(updated, 1);
    assert_eq!(stats.updated_endpoints, ["GET /endpoint1"]);
    let value = new.to_value();
    assert_eq!(value["collection"]["item"][0]["event"].as_array().unwrap().len(), 1);
    assert_eq!(value["collection"]["item"][1]["event"], json!([]));
}

#[test]
fn merge_without_match_changes_nothing() {
    let old = CollectionDocument::from_value(old_collection()).unwrap();
    let new_value = json!({"collection": {"item": [
        {"name": "Endpoint 3", "request": {"method": "PUT", "url": {"raw": "/endpoint3"}}, "event": []}
    ]}});
    let new = CollectionDocument::from_value(new_value.clone()).unwrap();

    let (merged, stats) = reconcile(&old, new);

    assert_eq!(stats.updated_count(), 0);
    assert_eq!(merged.to_value(), new_value);
}

#[test]
fn nested_folders_and_passthrough_fields_survive_file_transfer() {
    let dir = TempDir::new().unwrap();
    let old = json!({"collection": {
        "info": {"name": "Store", "_postman_id": "abc"},
        "item": [
            {"name": "orders", "item": [
                {"name": "list", "request": {"method": "GET", "url": {"raw": "{{baseUrl}}/orders"}},
                 "event": [{"listen": "test", "script": {"exec": ["a"]}}, {"listen": "prerequest"}]}
            ]}
        ]
    }});
    let new = json!({"collection": {
        "info": {"name": "Store", "_postman_id": "def"},
        "variable": [{"key": "baseUrl", "value": "https://store"}],
        "item": [
            {"name": "orders", "description": "Order ops", "item": [
                {"name": "list", "request": {"method": "GET", "url": {"raw": "{{baseUrl}}/orders"}},
                 "response": [{"code": 200}], "event": []},
                {"name": "create", "request": {"method": "POST", "url": "{{baseUrl}}/orders"}}
            ]},
            {"info": "not a node"}
        ]
    }});
    let old_path = dir.path().join("old.json");
    let new_path = dir.path().join("new.json");
    let out_path = dir.path().join("out").join("updated.json");
    fs::write(&old_path, old.to_string()).unwrap();
    fs::write(&new_path, new.to_string()).unwrap();

    let stats = reconcile_files(&old_path, &new_path, &out_path).unwrap();
    assert_eq!(stats.updated_events_count, 2);
    assert_eq!(stats.skipped_nodes, 1);

    let written: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    let mut expected = new.clone();
    expected["collection"]["item"][0]["item"][0]["event"] =
        old["collection"]["item"][0]["item"][0]["event"].clone();
    assert_eq!(written, expected);

    let top_keys: Vec<&String> = written["collection"].as_object().unwrap().keys().collect();
    assert_eq!(top_keys, ["info", "variable", "item"]);
}

#[test]
fn malformed_request_names_its_path() {
    let dir = TempDir::new().unwrap();
    let old_path = dir.path().join("old.json");
    let new_path = dir.path().join("new.json");
    fs::write(&old_path, old_collection().to_string()).unwrap();
    fs::write(
        &new_path,
        json!({"collection": {"item": [
            {"item": [{"request": {"method": 7, "url": {"raw": "/x"}}}]}
        ]}})
        .to_string(),
    )
    .unwrap();

    let err = reconcile_files(&old_path, &new_path, &dir.path().join("updated.json")).unwrap_err();
    match err {
        ApiError::InvalidCollection(message) => {
            assert!(message.contains("collection.item[0].item[0]"), "{}", message)
        }
        other => panic!("unexpected error: {other}"),
    }
}
