//! Named control-code shortcuts (`dtmf_custom_commands.json`)

use super::save_json;
use anyhow::{Result, bail};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name inside the state directory
pub const SHORTCUTS_FILE: &str = "dtmf_custom_commands.json";

const ID_LEN: usize = 13;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A saved control code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: String,
    pub name: String,
    pub code: String,
    pub created_at: String,
}

/// Loads and saves the shortcut list.
#[derive(Debug, Clone)]
pub struct ShortcutStore {
    path: PathBuf,
}

impl ShortcutStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the svxdesk state directory
    pub fn open() -> Result<Self> {
        Ok(Self::new(crate::paths::state_dir()?.join(SHORTCUTS_FILE)))
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All shortcuts; missing, unreadable or invalid files give an empty list
    pub fn load(&self) -> Vec<Shortcut> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Could not read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Invalid shortcuts in {}: {e}", self.path.display());
            Vec::new()
        })
    }

    /// Append a shortcut
    pub fn add(&self, name: &str, code: &str) -> Result<Shortcut> {
        let name = name.trim();
        let code = code.trim();
        if name.is_empty() || code.is_empty() {
            bail!("Shortcut name and code are required");
        }

        let now = Local::now();
        let shortcut = Shortcut {
            id: generate_id(name, code, now.timestamp_nanos_opt().unwrap_or_default()),
            name: name.to_string(),
            code: code.to_string(),
            created_at: now.format(TIMESTAMP_FORMAT).to_string(),
        };

        let mut shortcuts = self.load();
        shortcuts.push(shortcut.clone());
        save_json(&self.path, &shortcuts)?;

        log::info!("Added shortcut {} ({})", shortcut.name, shortcut.id);
        Ok(shortcut)
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut shortcuts = self.load();
        let before = shortcuts.len();
        shortcuts.retain(|s| s.id != id);

        if shortcuts.len() == before {
            return Ok(false);
        }

        save_json(&self.path, &shortcuts)?;
        log::info!("Removed shortcut {id}");
        Ok(true)
    }

    /// Find by exact id, then by case-insensitive name
    pub fn find(&self, id_or_name: &str) -> Option<Shortcut> {
        let shortcuts = self.load();
        let needle = id_or_name.trim();

        shortcuts
            .iter()
            .find(|s| s.id == needle)
            .or_else(|| shortcuts.iter().find(|s| s.name.eq_ignore_ascii_case(needle)))
            .cloned()
    }
}

fn generate_id(name: &str, code: &str, nanos: i64) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(name.as_bytes());
    hasher.update(b"\0");
    hasher.update(code.as_bytes());
    hasher.update(&nanos.to_le_bytes());
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..ID_LEN].to_string()
}

// ============================================================================
// Tests
// ============================================================================
