//! JSON state files shared with other tools on the node.

pub mod settings;
pub mod shortcuts;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub use settings::SettingsStore;
pub use shortcuts::ShortcutStore;

/// Mode applied after each save
#[cfg(unix)]
const SHARED_MODE: u32 = 0o664;

/// Write `value` as pretty JSON, creating the parent directory.
pub(crate) fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let content = serde_json::to_string_pretty(value).context("Failed to serialize state")?;
    confpatch::write_atomic(path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    share(path);
    Ok(())
}

#[cfg(unix)]
fn share(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(SHARED_MODE)) {
        log::debug!("Could not set permissions on {}: {e}", path.display());
    }
}

#[cfg(not(unix))]
fn share(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_json_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        save_json(&path, &vec!["a", "b"]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  \"a\",\n  \"b\"\n]");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_json_sets_shared_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        save_json(&path, &serde_json::json!({})).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }
}
