//! CLI Tooling
//!
//! Command-line interface for transfers, collection management, the links
//! registry and the sync workflow. All paths are scoped to a workspace root.

use crate::config::{ConfigLoader, StoragePaths, SyncConfig};
use crate::credentials::{api_key_status, resolve_api_key};
use crate::error::ApiError;
use crate::json::to_indented_string;
use crate::links::LinkRegistry;
use crate::logging::LoggingConfig;
use crate::postman::{CollectionApi, PostmanClient};
use crate::reconcile::reconcile_files;
use crate::spec::HttpSpecSource;
use crate::sync::{SyncReport, SyncService};
use crate::tooling::format::{
    format_add_link_text, format_links_text, format_section_heading, format_sync_report_text,
    format_transfer_text,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;

/// postman-sync - Keep Postman collections in step with their OpenAPI specs
#[derive(Parser, Debug)]
#[command(name = "postman-sync")]
#[command(about = "Regenerate Postman collections from OpenAPI specs without losing test scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Copy test scripts from an old collection file onto a new one
    Transfer {
        /// Collection whose scripts are kept
        old: PathBuf,
        /// Regenerated collection
        new: PathBuf,
        /// Where to write the merged collection
        output: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Work with collections stored in Postman
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },
    /// Rebuild every registered collection whose spec changed
    Sync {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Manage the links registry
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CollectionCommands {
    /// Print a collection as JSON
    Fetch {
        uid: String,
    },
    /// Delete a collection
    Delete {
        uid: String,
    },
    /// Import a spec as a new collection
    Create {
        /// URL of the Swagger/OpenAPI JSON document
        #[arg(long)]
        swagger_url: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum LinkCommands {
    /// Register a spec URL
    Add {
        /// URL of the Swagger/OpenAPI JSON document
        url: String,
        /// Existing collection whose scripts should be carried over
        #[arg(long)]
        collection_id: Option<String>,
    },
    /// List registered links
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

impl Cli {
    /// Fold the logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

/// What a command printed, plus the reason it should exit non-zero. A sync
/// run with failed entries still prints its full report.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub text: String,
    pub failure: Option<String>,
}

impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        Self {
            text,
            failure: None,
        }
    }
}

/// CLI context for executing commands
pub struct CliContext {
    workspace_root: PathBuf,
    config: SyncConfig,
    paths: StoragePaths,
    interactive: bool,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    /// Create a context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: SyncConfig) -> Result<Self, ApiError> {
        let paths = config.storage.resolve_paths(&workspace_root)?;
        Ok(Self {
            workspace_root,
            config,
            paths,
            interactive: true,
        })
    }

    /// Never prompt for an API key.
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a command, returning the text to print.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        self.run(command).map(|output| output.text)
    }

    /// Execute a command, keeping track of partial failures.
    pub fn run(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        let text = match command {
            Commands::Transfer {
                old,
                new,
                output,
                format,
            } => self.handle_transfer(old, new, output, format),
            Commands::Collection { command } => self.handle_collection(command),
            Commands::Sync { format } => return self.handle_sync(format),
            Commands::Link { command } => match command {
                LinkCommands::Add { url, collection_id } => {
                    self.handle_link_add(url, collection_id.as_deref())
                }
                LinkCommands::List { format } => self.handle_link_list(format),
            },
            Commands::Config { command } => match command {
                ConfigCommands::Show => self.handle_config_show(),
            },
        }?;
        Ok(text.into())
    }

    fn handle_transfer(
        &self,
        old: &Path,
        new: &Path,
        output: &Path,
        format: &str,
    ) -> Result<String, ApiError> {
        let old = self.workspace_root.join(old);
        let new = self.workspace_root.join(new);
        let output = self.workspace_root.join(output);
        let stats = reconcile_files(&old, &new, &output)?;

        match parse_format(format)? {
            OutputFormat::Json => to_indented_string(&json!({
                "output": output.display().to_string(),
                "stats": stats,
            })),
            OutputFormat::Text => Ok(format_transfer_text(&stats, &output)),
        }
    }

    fn handle_collection(&self, command: &CollectionCommands) -> Result<String, ApiError> {
        let client = self.postman_client()?;
        match command {
            CollectionCommands::Fetch { uid } => {
                let collection = block_on(client.fetch_collection(uid))?;
                to_indented_string(&collection)
            }
            CollectionCommands::Delete { uid } => {
                block_on(client.delete_collection(uid))?;
                info!(uid = %uid, "Collection deleted");
                Ok(format!("Deleted collection {}", uid))
            }
            CollectionCommands::Create { swagger_url } => {
                let specs = HttpSpecSource::new();
                let service = SyncService::new(&client, &specs, self.paths.clone());
                let uid = block_on(service.import_from_url(swagger_url))?;
                Ok(format!("Created collection {}", uid))
            }
        }
    }

    fn handle_sync(&self, format: &str) -> Result<CommandOutput, ApiError> {
        let format = parse_format(format)?;
        let mut registry = LinkRegistry::open(&self.paths.links_file)?;
        let client = self.postman_client()?;
        let specs = HttpSpecSource::new();
        let service = SyncService::new(&client, &specs, self.paths.clone());

        let report = block_on(async { Ok(service.sync_all(&mut registry).await) })?;
        sync_output(&report, format)
    }

    fn handle_link_add(&self, url: &str, collection_id: Option<&str>) -> Result<String, ApiError> {
        let mut registry = LinkRegistry::open(&self.paths.links_file)?;
        let client = self.postman_client()?;
        let specs = HttpSpecSource::new();
        let service = SyncService::new(&client, &specs, self.paths.clone());

        let outcome = block_on(service.add_link(&mut registry, url, collection_id))?;
        Ok(format_add_link_text(url, &outcome))
    }

    fn handle_link_list(&self, format: &str) -> Result<String, ApiError> {
        let format = parse_format(format)?;
        let registry = LinkRegistry::open(&self.paths.links_file)?;
        match format {
            OutputFormat::Json => registry.to_json_string(),
            OutputFormat::Text => Ok(format_links_text(registry.entries())),
        }
    }

    fn handle_config_show(&self) -> Result<String, ApiError> {
        let rendered = toml::to_string_pretty(&self.config.redacted())
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))?;

        let mut out = String::new();
        out.push_str(&format!("{}\n\n", format_section_heading("Configuration")));
        out.push_str(&rendered);
        out.push('\n');
        out.push_str(&format!("{}\n\n", format_section_heading("Resolved paths")));
        out.push_str(&format!("  Links file: {}\n", self.paths.links_file.display()));
        out.push_str(&format!("  New collection: {}\n", self.paths.new_file.display()));
        out.push_str(&format!("  Old collection: {}\n", self.paths.old_file.display()));
        out.push_str(&format!(
            "  Updated collection: {}\n",
            self.paths.updated_file.display()
        ));
        out.push_str(&format!(
            "  API key: {}\n",
            api_key_status(&self.config.postman, &self.workspace_root)
        ));
        Ok(out)
    }

    fn postman_client(&self) -> Result<PostmanClient, ApiError> {
        let key = resolve_api_key(&self.config.postman, &self.workspace_root, self.interactive)?;
        Ok(PostmanClient::new(
            self.config.postman.base_url.clone(),
            key.key,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn sync_output(report: &SyncReport, format: OutputFormat) -> Result<CommandOutput, ApiError> {
    let text = match format {
        OutputFormat::Json => to_indented_string(report)?,
        OutputFormat::Text => format_sync_report_text(report),
    };
    let failure = report.has_failures().then(|| {
        format!(
            "{} of {} links failed to sync",
            report.failed_count(),
            report.results.len()
        )
    });
    Ok(CommandOutput { text, failure })
}

/// Run a future to completion on a fresh runtime.
fn block_on<F, T>(future: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
    rt.block_on(future)
}
