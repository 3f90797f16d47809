//! Postman API key resolution.
//!
//! Order: `POSTMAN_API_KEY`, then `postman.api_key` from config, then the key
//! file, then a hidden prompt whose answer is saved to the key file.

use crate::config::PostmanConfig;
use crate::error::ApiError;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const API_KEY_ENV: &str = "POSTMAN_API_KEY";

/// Where the key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    Config,
    KeyFile,
    Prompt,
}

#[derive(Debug, Clone)]
pub struct ResolvedApiKey {
    pub key: String,
    pub source: ApiKeySource,
}

/// Resolve the key for a workspace. Prompts only when stdin is a terminal
/// and `interactive` is set.
pub fn resolve_api_key(
    postman: &PostmanConfig,
    workspace_root: &Path,
    interactive: bool,
) -> Result<ResolvedApiKey, ApiError> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let key_file = key_file_path(postman, workspace_root);
    let can_prompt = interactive && std::io::stdin().is_terminal();
    resolve_with(env_key, postman, &key_file, can_prompt, prompt_for_key)
}

/// Key file location; relative paths are taken from the workspace root.
pub fn key_file_path(postman: &PostmanConfig, workspace_root: &Path) -> PathBuf {
    workspace_root.join(&postman.api_key_file)
}

/// Human readable status for `config show`, never the key itself.
pub fn api_key_status(postman: &PostmanConfig, workspace_root: &Path) -> String {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let key_file = key_file_path(postman, workspace_root);
    match resolve_with(env_key, postman, &key_file, false, prompt_for_key) {
        Ok(resolved) => match resolved.source {
            ApiKeySource::Environment => format!("Set (from {})", API_KEY_ENV),
            ApiKeySource::Config => "Set (from config)".to_string(),
            ApiKeySource::KeyFile => format!("Set (from {})", key_file.display()),
            ApiKeySource::Prompt => "Set".to_string(),
        },
        Err(_) => "Not set".to_string(),
    }
}

fn resolve_with<P>(
    env_key: Option<String>,
    postman: &PostmanConfig,
    key_file: &Path,
    can_prompt: bool,
    prompt: P,
) -> Result<ResolvedApiKey, ApiError>
where
    P: FnOnce() -> Result<String, ApiError>,
{
    if let Some(key) = non_empty(env_key) {
        info!("API key loaded from environment variable");
        return Ok(ResolvedApiKey {
            key,
            source: ApiKeySource::Environment,
        });
    }

    if let Some(key) = non_empty(postman.api_key.clone()) {
        info!("API key loaded from config");
        return Ok(ResolvedApiKey {
            key,
            source: ApiKeySource::Config,
        });
    }

    if key_file.exists() {
        let contents = std::fs::read_to_string(key_file).map_err(|e| ApiError::io(key_file, e))?;
        if let Some(key) = non_empty(Some(contents)) {
            info!("API key loaded from file");
            return Ok(ResolvedApiKey {
                key,
                source: ApiKeySource::KeyFile,
            });
        }
    }

    error!("No API key found. Set POSTMAN_API_KEY or provide the API key");
    if !can_prompt {
        return Err(ApiError::MissingApiKey);
    }

    let key = non_empty(Some(prompt()?)).ok_or(ApiError::MissingApiKey)?;
    save_api_key(key_file, &key)?;
    Ok(ResolvedApiKey {
        key,
        source: ApiKeySource::Prompt,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn prompt_for_key() -> Result<String, ApiError> {
    dialoguer::Password::new()
        .with_prompt("Enter your Postman API key")
        .interact()
        .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
}

fn save_api_key(path: &Path, key: &str) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::io(parent, e))?;
        }
    }
    std::fs::write(path, key).map_err(|e| ApiError::io(path, e))?;
    info!(path = %path.display(), "API key saved");
    Ok(())
}
