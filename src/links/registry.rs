//! Load/save of the links file.

use super::entry::LinkEntry;
use crate::error::ApiError;
use crate::json::{to_indented_string, write_indented};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// In-memory copy of the links file, written back with [`LinkRegistry::save`].
#[derive(Debug, Clone)]
pub struct LinkRegistry {
    path: PathBuf,
    entries: Vec<LinkEntry>,
}

impl LinkRegistry {
    /// Create the file as `[]` when it does not exist yet.
    pub fn initialize(path: &Path) -> Result<(), ApiError> {
        if path.exists() {
            return Ok(());
        }
        write_indented(path, &Value::Array(Vec::new()))?;
        info!(path = %path.display(), "Links file initialized");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let text = std::fs::read_to_string(path).map_err(|e| ApiError::io(path, e))?;
        let entries: Vec<LinkEntry> = serde_json::from_str(&text)?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Initialize then load.
    pub fn open(path: &Path) -> Result<Self, ApiError> {
        Self::initialize(path)?;
        Self::load(path)
    }

    pub fn save(&self) -> Result<(), ApiError> {
        let value = serde_json::to_value(&self.entries)?;
        write_indented(&self.path, &value)?;
        info!(path = %self.path.display(), entries = self.entries.len(), "Links file updated");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, link: &str) -> Option<&LinkEntry> {
        self.entries.iter().find(|entry| entry.link == link)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.find(link).is_some()
    }

    /// Replace the entry with the same link, or append.
    pub fn upsert(&mut self, entry: LinkEntry) {
        match self.entries.iter_mut().find(|e| e.link == entry.link) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Append a link that must not be registered yet.
    pub fn register(&mut self, entry: LinkEntry) -> Result<(), ApiError> {
        if self.contains(&entry.link) {
            return Err(ApiError::LinkAlreadyRegistered(entry.link));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Current file contents as they would be saved.
    pub fn to_json_string(&self) -> Result<String, ApiError> {
        let value = serde_json::to_value(&self.entries)?;
        to_indented_string(&value)
    }
}
