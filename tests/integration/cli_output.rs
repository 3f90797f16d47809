use postman_sync::config::SyncConfig;
use postman_sync::error::ApiError;
use postman_sync::tooling::cli::{
    CliContext, CollectionCommands, Commands, ConfigCommands, LinkCommands,
};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::support::{collection_envelope, request_item, test_script};

fn context(dir: &TempDir) -> CliContext {
    CliContext::with_config(dir.path().to_path_buf(), SyncConfig::default())
        .unwrap()
        .non_interactive()
}

#[test]
fn transfer_json_contract_has_required_fields() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("old.json"),
        collection_envelope(
            "Pets",
            vec![request_item("GET", "/pets", Some(test_script("ok")))],
        )
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("new.json"),
        collection_envelope("Pets", vec![request_item("GET", "/pets", Some(json!([])))]).to_string(),
    )
    .unwrap();

    let output = context(&dir)
        .execute(&Commands::Transfer {
            old: PathBuf::from("old.json"),
            new: PathBuf::from("new.json"),
            output: PathBuf::from("updated.json"),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["stats"]["old_endpoint_count"], json!(1));
    assert_eq!(parsed["stats"]["updated_endpoints"], json!(["GET /pets"]));
    assert_eq!(parsed["stats"]["updated_events_count"], json!(1));
    assert!(parsed["output"].as_str().unwrap().ends_with("updated.json"));
    assert!(dir.path().join("updated.json").exists());
}

#[test]
fn transfer_with_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let err = context(&dir)
        .execute(&Commands::Transfer {
            old: PathBuf::from("missing-old.json"),
            new: PathBuf::from("missing-new.json"),
            output: PathBuf::from("updated.json"),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Io { .. }));
    assert!(!dir.path().join("updated.json").exists());
}

#[test]
fn link_list_initializes_registry() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);

    let output = ctx
        .execute(&Commands::Link {
            command: LinkCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    assert_eq!(output, "[]");
    assert!(dir.path().join("links.json").exists());

    let text = ctx
        .execute(&Commands::Link {
            command: LinkCommands::List {
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(text.contains("No links registered."));
}

#[test]
fn link_list_shows_registered_entries() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("links.json"),
        r#"[{"link": "https://a/swagger.json", "hash": "0123456789abcdef0123", "Collection UID": "uid-a", "Last Date Updated": "2024-05-01T10:00:00.000000"}]"#,
    )
    .unwrap();

    let output = context(&dir)
        .execute(&Commands::Link {
            command: LinkCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed[0]["Collection UID"], json!("uid-a"));
}

#[test]
fn config_show_lists_resolved_paths() {
    let dir = TempDir::new().unwrap();
    let mut config = SyncConfig::default();
    config.postman.api_key = Some("PMAK-secret".to_string());
    let ctx = CliContext::with_config(dir.path().to_path_buf(), config).unwrap();

    let output = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Show,
        })
        .unwrap();
    assert!(output.contains("base_url = \"https://api.getpostman.com\""));
    assert!(output.contains("Links file:"));
    assert!(!output.contains("PMAK-secret"));
}

#[test]
fn config_file_is_honored() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("custom.toml");
    fs::write(&config_path, "[storage]\nlinks_file = \"registry.json\"\n").unwrap();

    let ctx = CliContext::new(dir.path().to_path_buf(), Some(config_path)).unwrap();
    assert_eq!(ctx.paths().links_file, dir.path().join("registry.json"));
}

#[test]
fn postman_commands_need_an_api_key() {
    if std::env::var("POSTMAN_API_KEY").is_ok() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let err = context(&dir)
        .execute(&Commands::Collection {
            command: CollectionCommands::Fetch {
                uid: "123".to_string(),
            },
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingApiKey));
}
