//! Centralized path resolution for svxdesk
//!
//! # Environment Variables
//!
//! - `SVXDESK_CONFIG_DIR` - Override config directory
//! - `SVXDESK_STATE_DIR` - Override state directory (template settings, shortcuts)
//! - `SVXDESK_DAEMON_CONFIG` - Override the daemon configuration file
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `SVXDESK_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/svxdesk` (if set)
//! 3. `~/.config/svxdesk`
//!
//! For state_dir():
//! 1. `SVXDESK_STATE_DIR` environment variable
//! 2. `XDG_STATE_HOME/svxdesk` (if set)
//! 3. `~/.local/state/svxdesk`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "SVXDESK_CONFIG_DIR";

/// Environment variable for state directory override
pub const ENV_STATE_DIR: &str = "SVXDESK_STATE_DIR";

/// Environment variable for daemon configuration file override
pub const ENV_DAEMON_CONFIG: &str = "SVXDESK_DAEMON_CONFIG";

const APP_DIR: &str = "svxdesk";

/// Get the svxdesk config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join(APP_DIR);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR);
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the svxdesk state directory path
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_STATE_DIR) {
        let path = expand(&dir);
        log::debug!("Using state dir from {}: {}", ENV_STATE_DIR, path.display());
        return Ok(path);
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(xdg_state).join(APP_DIR);
        log::debug!("Using XDG_STATE_HOME: {}", path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".local").join("state").join(APP_DIR);
    log::debug!("Using default state dir: {}", path.display());
    Ok(path)
}

/// Daemon configuration override from the environment, if set.
pub fn daemon_config_override() -> Option<String> {
    std::env::var(ENV_DAEMON_CONFIG)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables are left as written.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    /// Serializes tests that touch process environment variables.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Run `f` with `key` set to `value`, restoring the previous value after.
    pub(crate) fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: env-mutating tests hold ENV_LOCK
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: as above
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    /// Run `f` with `key` removed, restoring the previous value after.
    pub(crate) fn without_env_var<F, R>(key: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: env-mutating tests hold ENV_LOCK
        unsafe { env::remove_var(key) };
        let result = f();
        if let Some(v) = original {
            // SAFETY: as above
            unsafe { env::set_var(key, v) };
        }
        result
    }

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn test_config_dir_env_override() {
        let _guard = lock();
        with_env_var(ENV_CONFIG_DIR, "/custom/config/path", || {
            let result = config_dir().unwrap();
            assert_eq!(result, PathBuf::from("/custom/config/path"));
        });
    }

    #[test]
    fn test_config_dir_env_override_with_tilde() {
        let _guard = lock();
        let home = dirs::home_dir().unwrap();
        let expected = home.join("radio").join("svxdesk-tilde-test");
        with_env_var(ENV_CONFIG_DIR, "~/radio/svxdesk-tilde-test", || {
            let result = config_dir().unwrap();
            assert_eq!(result, expected);
        });
    }

    #[test]
    fn test_xdg_config_home() {
        let _guard = lock();
        without_env_var(ENV_CONFIG_DIR, || {
            with_env_var("XDG_CONFIG_HOME", "/tmp/xdg-config-test", || {
                let result = config_dir().unwrap();
                assert_eq!(result, PathBuf::from("/tmp/xdg-config-test/svxdesk"));
            });
        });
    }

    #[test]
    fn test_state_dir_env_override() {
        let _guard = lock();
        with_env_var(ENV_STATE_DIR, "/custom/state/path", || {
            let result = state_dir().unwrap();
            assert_eq!(result, PathBuf::from("/custom/state/path"));
        });
    }

    #[test]
    fn test_xdg_state_home() {
        let _guard = lock();
        without_env_var(ENV_STATE_DIR, || {
            with_env_var("XDG_STATE_HOME", "/tmp/xdg-state-test", || {
                let result = state_dir().unwrap();
                assert_eq!(result, PathBuf::from("/tmp/xdg-state-test/svxdesk"));
            });
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_default_state_dir_unix() {
        let _guard = lock();
        without_env_var(ENV_STATE_DIR, || {
            without_env_var("XDG_STATE_HOME", || {
                let result = state_dir().unwrap();
                let home = dirs::home_dir().unwrap();
                assert_eq!(result, home.join(".local").join("state").join("svxdesk"));
            });
        });
    }

    #[test]
    fn test_daemon_config_override() {
        let _guard = lock();
        with_env_var(ENV_DAEMON_CONFIG, "/tmp/svxlink.conf", || {
            assert_eq!(
                daemon_config_override().as_deref(),
                Some("/tmp/svxlink.conf")
            );
        });
        with_env_var(ENV_DAEMON_CONFIG, "  ", || {
            assert_eq!(daemon_config_override(), None);
        });
    }

    #[test]
    fn test_expand_with_tilde() {
        let result = expand("~/svxlink.conf");
        let home = dirs::home_dir().unwrap();
        assert_eq!(result, home.join("svxlink.conf"));
    }

    #[test]
    fn test_expand_absolute() {
        assert_eq!(
            expand("/etc/svxlink/svxlink.conf"),
            PathBuf::from("/etc/svxlink/svxlink.conf")
        );
    }

    #[test]
    fn test_expand_unknown_env_var_unchanged() {
        let result = expand("/path/$NONEXISTENT_VAR_12345/file");
        assert_eq!(result, PathBuf::from("/path/$NONEXISTENT_VAR_12345/file"));
    }
}
