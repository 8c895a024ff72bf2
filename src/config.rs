//! Tool settings (`config.toml`)

use crate::paths;
use anyhow::{Context, Result};
use confpatch::GovernedKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Config Structures
// ============================================================================

/// svxdesk settings; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Daemon configuration file to read and patch
    pub daemon_config: String,

    /// Command run after a configuration change is written
    pub restart_command: String,

    /// Shell interpreting rendered control-code commands
    pub shell: String,

    /// The section-scoped key naming the control device
    pub device_key: DeviceKeyConfig,
}

/// Where the control device path lives in the daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceKeyConfig {
    pub section: String,
    pub key: String,
    pub default_value: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daemon_config: "/etc/svxlink/svxlink.conf".to_string(),
            restart_command: "sudo systemctl restart svxlink".to_string(),
            shell: dtmf::executor::shell::DEFAULT_SHELL.to_string(),
            device_key: DeviceKeyConfig::default(),
        }
    }
}

impl Default for DeviceKeyConfig {
    fn default() -> Self {
        Self {
            section: "SimplexLogic".to_string(),
            key: "DTMF_CTRL_PTY".to_string(),
            default_value: "/dev/shm/dtmf_ctrl".to_string(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl AppConfig {
    /// Path of the config file
    pub fn path() -> Result<PathBuf> {
        Ok(paths::config_dir()?.join(CONFIG_FILE))
    }

    /// Load from the config directory, applying environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path()?)?;
        if let Some(daemon_config) = paths::daemon_config_override() {
            log::debug!("Daemon config from {}: {daemon_config}", paths::ENV_DAEMON_CONFIG);
            config.daemon_config = daemon_config;
        }
        Ok(config)
    }

    /// Load from a specific file, or return defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Daemon configuration path with `~` and `$VAR` expanded
    pub fn daemon_config_path(&self) -> PathBuf {
        paths::expand(&self.daemon_config)
    }

    /// The governed key toggled by `--enable`/`--disable`
    pub fn governed_key(&self) -> GovernedKey {
        GovernedKey::new(
            self.device_key.section.as_str(),
            self.device_key.key.as_str(),
            self.device_key.default_value.as_str(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::tests::{ENV_LOCK, with_env_var, without_env_var};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.daemon_config, "/etc/svxlink/svxlink.conf");
        assert_eq!(config.shell, "bash");
        assert_eq!(config.device_key.key, "DTMF_CTRL_PTY");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
daemon_config = "~/svxlink.conf"

[device_key]
section = "RepeaterLogic"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.daemon_config, "~/svxlink.conf");
        assert_eq!(config.restart_command, "sudo systemctl restart svxlink");
        assert_eq!(config.device_key.section, "RepeaterLogic");
        assert_eq!(config.device_key.key, "DTMF_CTRL_PTY");

        let home = dirs::home_dir().unwrap();
        assert_eq!(config.daemon_config_path(), home.join("svxlink.conf"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "daemon_config = [").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_applies_env_overrides() {
        let _guard = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let dir = TempDir::new().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();

        with_env_var(paths::ENV_CONFIG_DIR, &dir_str, || {
            without_env_var(paths::ENV_DAEMON_CONFIG, || {
                assert_eq!(AppConfig::load().unwrap(), AppConfig::default());
            });
            with_env_var(paths::ENV_DAEMON_CONFIG, "/tmp/test-svxlink.conf", || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.daemon_config, "/tmp/test-svxlink.conf");
            });
        });
    }

    #[test]
    fn test_governed_key() {
        let key = AppConfig::default().governed_key();
        assert_eq!(key.section, "SimplexLogic");
        assert_eq!(key.key, "DTMF_CTRL_PTY");
        assert_eq!(key.default_value, "/dev/shm/dtmf_ctrl");
    }
}
