//! Atomic write-back of patched content.
//!
//! Content goes to a temporary file in the target's directory, is synced,
//! takes over the original file's permissions and is then renamed over the
//! target. A symlinked target is resolved first so the link itself survives.

use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`.
pub fn write_atomic(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    let content = content.as_ref();
    let persist_err = |source: std::io::Error| Error::Persist {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path).map_err(persist_err)?;
    let path = target.as_path();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(persist_err)?;
    tmp.write_all(content).map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;

    // Best effort: the write itself is what matters.
    if let Ok(meta) = std::fs::metadata(path)
        && let Err(e) = std::fs::set_permissions(tmp.path(), meta.permissions())
    {
        log::debug!("Could not copy permissions onto {}: {e}", tmp.path().display());
    }

    tmp.persist(path).map_err(|e| persist_err(e.error))?;
    log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Follow a symlink at `path` to the file it points to.
fn resolve_target(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = std::fs::canonicalize(path)?;
            log::debug!("{} resolves to {}", path.display(), target.display());
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("svxlink.conf");
        std::fs::write(&path, "OLD=1\n").unwrap();

        write_atomic(&path, "NEW=2\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NEW=2\n");

        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("svxlink.conf");
        std::fs::write(&path, "A=1\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, "A=2\n").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_write_atomic_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("svxlink.conf");
        let err = write_atomic(&path, "A=1\n").unwrap_err();
        assert!(matches!(err, Error::Persist { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_write_atomic_accepts_raw_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("svxlink.conf");
        write_atomic(&path, b"# configuraci\xf3n\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"# configuraci\xf3n\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("svxlink.conf.real");
        let link = dir.path().join("svxlink.conf");
        std::fs::write(&real, "A=1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_atomic(&link, "A=2\n").unwrap();

        let meta = std::fs::symlink_metadata(&link).unwrap();
        assert!(meta.file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "A=2\n");
        assert_eq!(std::fs::read_to_string(&link).unwrap(), "A=2\n");
    }
}
