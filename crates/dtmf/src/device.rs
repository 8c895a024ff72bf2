//! Control device status.
//!
//! The control device is usually a FIFO or PTY created by the daemon. It is
//! never opened here: opening a FIFO for writing blocks until a reader shows
//! up, so writability is reported from the readability probe.

use std::path::{Path, PathBuf};

/// Snapshot of the control device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceStatus {
    /// Path that was probed
    pub path: PathBuf,
    /// Whether anything exists at the path
    pub exists: bool,
    /// Whether the current user may read it
    pub readable: bool,
    /// Mirrors `readable`; a FIFO is never probed for writing
    pub writable: bool,
    /// Whether submissions are accepted; the device exists
    pub enabled: bool,
    /// Symlink target, when the path is a symlink
    pub resolved: Option<PathBuf>,
}

impl DeviceStatus {
    /// Probe `path` without opening it.
    pub fn probe(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let exists = path.exists();
        let readable = exists && is_readable(path);
        let resolved = std::fs::read_link(path).ok();

        log::debug!(
            "Device {}: exists={exists}, readable={readable}",
            path.display()
        );

        Self {
            path: path.to_path_buf(),
            exists,
            readable,
            writable: readable,
            enabled: exists,
            resolved,
        }
    }
}

#[cfg(unix)]
fn is_readable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    // SAFETY: access only reads the NUL-terminated path we own.
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK) == 0 }
}

#[cfg(not(unix))]
fn is_readable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}
