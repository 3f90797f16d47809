use clap::Parser;
use postman_sync::tooling::cli::{
    Cli, CollectionCommands, Commands, ConfigCommands, LinkCommands,
};
use std::path::PathBuf;

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["postman-sync", "transfer", "old.json", "new.json", "updated.json"],
        vec![
            "postman-sync",
            "transfer",
            "old.json",
            "new.json",
            "updated.json",
            "--format",
            "json",
        ],
        vec!["postman-sync", "collection", "fetch", "123-abc"],
        vec!["postman-sync", "collection", "delete", "123-abc"],
        vec![
            "postman-sync",
            "collection",
            "create",
            "--swagger-url",
            "https://a/swagger.json",
        ],
        vec!["postman-sync", "sync"],
        vec!["postman-sync", "sync", "--format", "json"],
        vec!["postman-sync", "link", "add", "https://a/swagger.json"],
        vec![
            "postman-sync",
            "link",
            "add",
            "https://a/swagger.json",
            "--collection-id",
            "123-abc",
        ],
        vec!["postman-sync", "link", "list", "--format", "json"],
        vec!["postman-sync", "config", "show"],
        vec![
            "postman-sync",
            "--workspace",
            "/tmp/ws",
            "--config",
            "/tmp/ws/custom.toml",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "sync",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_incomplete_commands() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["postman-sync"],
        vec!["postman-sync", "transfer", "old.json", "new.json"],
        vec!["postman-sync", "collection", "fetch"],
        vec!["postman-sync", "collection", "create"],
        vec!["postman-sync", "link", "add"],
        vec!["postman-sync", "link", "remove", "https://a"],
        vec!["postman-sync", "config"],
    ];

    for args in cases {
        assert!(
            Cli::try_parse_from(args.clone()).is_err(),
            "expected parse failure for args: {args:?}"
        );
    }
}

#[test]
fn parse_maps_arguments_onto_commands() {
    let cli = Cli::try_parse_from(["postman-sync", "transfer", "a.json", "b.json", "c.json"]).unwrap();
    assert_eq!(cli.workspace, PathBuf::from("."));
    assert_eq!(
        cli.command,
        Commands::Transfer {
            old: PathBuf::from("a.json"),
            new: PathBuf::from("b.json"),
            output: PathBuf::from("c.json"),
            format: "text".to_string(),
        }
    );

    let cli = Cli::try_parse_from([
        "postman-sync",
        "link",
        "add",
        "https://a",
        "--collection-id",
        "uid-1",
    ])
    .unwrap();
    assert_eq!(
        cli.command,
        Commands::Link {
            command: LinkCommands::Add {
                url: "https://a".to_string(),
                collection_id: Some("uid-1".to_string()),
            }
        }
    );

    let cli = Cli::try_parse_from(["postman-sync", "collection", "create", "--swagger-url", "https://s"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Collection {
            command: CollectionCommands::Create {
                swagger_url: "https://s".to_string(),
            }
        }
    );

    let cli = Cli::try_parse_from(["postman-sync", "config", "show"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Config {
            command: ConfigCommands::Show
        }
    );
}
