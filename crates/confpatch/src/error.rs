//! Error types for configuration patching.
//!
//! Patch errors never abort a patch on their own: a missing section only
//! skips the insertion it was needed for, and persistence errors leave the
//! in-memory patch result valid for a retry.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of patch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The document lacks a section an insertion required
    SectionNotFound,
    /// Reading or writing the backing file failed
    Persistence,
    /// The request itself was malformed
    Request,
}

impl ErrorCategory {
    /// Whether the operator can retry the same operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::SectionNotFound => "Section not found",
            Self::Persistence => "Could not persist configuration",
            Self::Request => "Invalid update request",
        }
    }
}

/// Errors that can occur while reading, patching or writing a configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A governed key had to be inserted but its section does not exist
    #[error("section [{section}] not found; {key} was not inserted")]
    SectionNotFound {
        /// Name of the governing section
        section: String,
        /// Key that could not be inserted
        key: String,
    },

    /// Reading the configuration file failed
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Writing the patched configuration back failed
    #[error("failed to write {path}: {source}")]
    Persist {
        /// File being written
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A `KEY=VALUE` pair could not be parsed
    #[error("invalid assignment '{0}', expected KEY=VALUE")]
    InvalidAssignment(String),

    /// A key name contains characters outside `[A-Za-z0-9_]`
    #[error("invalid key name '{0}'")]
    InvalidKey(String),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::SectionNotFound { .. } => ErrorCategory::SectionNotFound,
            Error::Read { .. } | Error::Persist { .. } => ErrorCategory::Persistence,
            Error::InvalidAssignment(_) | Error::InvalidKey(_) => ErrorCategory::Request,
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

/// Result type for patch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = Error::SectionNotFound {
            section: "SimplexLogic".to_string(),
            key: "DTMF_CTRL_PTY".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::SectionNotFound);
        assert!(!err.is_retryable());

        let err = Error::Persist {
            path: PathBuf::from("/etc/svxlink/svxlink.conf"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.category(), ErrorCategory::Persistence);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_section_not_found_message() {
        let err = Error::SectionNotFound {
            section: "SimplexLogic".to_string(),
            key: "DTMF_CTRL_PTY".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "section [SimplexLogic] not found; DTMF_CTRL_PTY was not inserted"
        );
    }
}
