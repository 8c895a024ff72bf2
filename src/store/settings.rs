//! Control-code execution template (`dtmf_config.json`)

use super::save_json;
use anyhow::{Result, bail};
use dtmf::{CommandTemplate, DEFAULT_TEMPLATE, FALLBACK_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name inside the state directory
pub const SETTINGS_FILE: &str = "dtmf_config.json";

/// Persisted control settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtmfSettings {
    /// Template with `{DTMF_CODE}` and `{PTY_DEVICE}` slots
    #[serde(default = "fallback_template")]
    pub execution_command: String,

    /// Control device path as last discovered
    #[serde(default)]
    pub pty_path: String,
}

fn fallback_template() -> String {
    FALLBACK_TEMPLATE.to_string()
}

impl DtmfSettings {
    fn with_template(template: &str, pty_path: &str) -> Self {
        Self {
            execution_command: template.to_string(),
            pty_path: pty_path.to_string(),
        }
    }

    /// The template, ready to render
    pub fn template(&self) -> CommandTemplate {
        CommandTemplate::new(self.execution_command.as_str())
    }
}

/// Loads and saves [`DtmfSettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the svxdesk state directory
    pub fn open() -> Result<Self> {
        Ok(Self::new(crate::paths::state_dir()?.join(SETTINGS_FILE)))
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, with `pty_path` replaced by the freshly discovered
    /// `device_path`.
    ///
    /// Never fails: a missing file yields the default template and an
    /// unreadable or invalid one yields the fallback template.
    pub fn load(&self, device_path: &str) -> DtmfSettings {
        let mut settings = self.load_raw();
        settings.pty_path = device_path.to_string();
        settings
    }

    fn load_raw(&self) -> DtmfSettings {
        let default_device = crate::config::DeviceKeyConfig::default().default_value;

        if !self.path.exists() {
            log::debug!("Settings file does not exist, using default template");
            return DtmfSettings::with_template(DEFAULT_TEMPLATE, &default_device);
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Could not read {}: {e}", self.path.display());
                return DtmfSettings::with_template(FALLBACK_TEMPLATE, &default_device);
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}", self.path.display());
                DtmfSettings::with_template(FALLBACK_TEMPLATE, &default_device)
            }
        }
    }

    /// Save a new template together with the current device path
    pub fn save(&self, template: &str, device_path: &str) -> Result<DtmfSettings> {
        let template = template.trim();
        if template.is_empty() {
            bail!("Execution template cannot be empty");
        }

        let settings = DtmfSettings::with_template(template, device_path);
        save_json(&self.path, &settings)?;
        log::info!("Saved execution template to {}", self.path.display());
        Ok(settings)
    }

    /// Restore the default template
    pub fn reset(&self, device_path: &str) -> Result<DtmfSettings> {
        self.save(DEFAULT_TEMPLATE, device_path)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join(SETTINGS_FILE))
    }

    #[test]
    fn test_missing_file_uses_default_template() {
        let dir = TempDir::new().unwrap();
        let settings = store(&dir).load("/dev/shm/dtmf_ctrl");
        assert_eq!(settings.execution_command, DEFAULT_TEMPLATE);
        assert_eq!(settings.pty_path, "/dev/shm/dtmf_ctrl");
    }

    #[test]
    fn test_invalid_json_uses_fallback_template() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "{not json").unwrap();

        let settings = store.load("/dev/shm/dtmf_ctrl");
        assert_eq!(settings.execution_command, FALLBACK_TEMPLATE);
    }

    #[test]
    fn test_non_object_json_uses_fallback_template() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "\"printf\"").unwrap();

        assert_eq!(store.load("/x").execution_command, FALLBACK_TEMPLATE);
    }

    #[test]
    fn test_load_refreshes_device_path() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save("echo {DTMF_CODE}", "/old/device").unwrap();

        let settings = store.load("/new/device");
        assert_eq!(settings.execution_command, "echo {DTMF_CODE}");
        assert_eq!(settings.pty_path, "/new/device");
    }

    #[test]
    fn test_save_writes_pretty_json() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save("  echo {DTMF_CODE} > {PTY_DEVICE}  ", "/dev/shm/dtmf_ctrl").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\n  \"execution_command\": \"echo {DTMF_CODE} > {PTY_DEVICE}\""));
        assert!(content.contains("\"pty_path\": \"/dev/shm/dtmf_ctrl\""));
    }

    #[test]
    fn test_save_rejects_blank_template() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.save("   ", "/x").is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_reset_restores_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save("true", "/x").unwrap();
        store.reset("/x").unwrap();
        assert_eq!(store.load("/x").execution_command, DEFAULT_TEMPLATE);
    }
}
