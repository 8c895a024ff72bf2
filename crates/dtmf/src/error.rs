//! Error types for control-code delivery.
//!
//! None of these abort the process: each one ends up inside an
//! [`ExecutionResult`](crate::ExecutionResult) handed back to the operator.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of delivery errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before anything ran
    Precondition,
    /// The command ran and reported failure
    Command,
    /// The command's status could not be recovered
    Status,
    /// The process could not be started
    Spawn,
}

impl ErrorCategory {
    /// Whether no process was started.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition)
    }

    /// Get actionable advice for this category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Precondition => "Check the control device path and the submitted code",
            Self::Command => "Check the execution template and device permissions",
            Self::Status => "Check that the template is a valid shell command line",
            Self::Spawn => "Check that a POSIX shell is available",
        }
    }
}

/// Errors that can occur while delivering a control code.
#[derive(Debug, Error)]
pub enum Error {
    /// The control device does not exist
    #[error("control device does not exist: {0}")]
    DeviceMissing(PathBuf),

    /// The submitted control code was blank
    #[error("control code is empty")]
    EmptyControlCode,

    /// The template rendered to an empty command line
    #[error("rendered command is empty; check the execution template")]
    EmptyCommand,

    /// The command ran and exited non-zero
    #[error("command failed (exit status {status}){}", details(.output))]
    ExecutionFailed {
        /// Recovered exit status
        status: i32,
        /// Captured output, sentinel removed
        output: String,
    },

    /// The command finished but no exit status marker was found
    #[error("could not recover the command's exit status{}", details(.output))]
    SentinelMissing {
        /// Everything captured from the wrapper
        output: String,
    },

    /// The wrapping shell itself failed before reporting a status
    #[error("command wrapper failed ({}){}", describe_code(.code), details(.output))]
    WrapperFailed {
        /// Wrapper exit code, `None` if killed by a signal
        code: Option<i32>,
        /// Everything captured from the wrapper
        output: String,
    },

    /// The wrapper process could not be spawned
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying IO error
        source: std::io::Error,
    },
}

fn details(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(". Details: {output}")
    }
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::DeviceMissing(_) | Error::EmptyControlCode => ErrorCategory::Precondition,
            Error::EmptyCommand | Error::ExecutionFailed { .. } => ErrorCategory::Command,
            Error::SentinelMissing { .. } | Error::WrapperFailed { .. } => ErrorCategory::Status,
            Error::Spawn { .. } => ErrorCategory::Spawn,
        }
    }

    /// Recovered exit status, when the command actually reported one.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            Error::ExecutionFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_message() {
        let err = Error::ExecutionFailed {
            status: 1,
            output: "tee: /dev/shm/dtmf_ctrl: Permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "command failed (exit status 1). Details: tee: /dev/shm/dtmf_ctrl: Permission denied"
        );
        assert_eq!(err.exit_status(), Some(1));
    }

    #[test]
    fn test_execution_failed_without_output() {
        let err = Error::ExecutionFailed {
            status: 2,
            output: String::new(),
        };
        assert_eq!(err.to_string(), "command failed (exit status 2)");
    }

    #[test]
    fn test_status_errors_carry_no_exit_code() {
        let err = Error::SentinelMissing {
            output: String::new(),
        };
        assert_eq!(err.exit_status(), None);
        assert_eq!(err.category(), ErrorCategory::Status);

        let err = Error::WrapperFailed {
            code: None,
            output: String::new(),
        };
        assert_eq!(err.to_string(), "command wrapper failed (terminated by signal)");
    }

    #[test]
    fn test_precondition_category() {
        assert!(
            Error::DeviceMissing(PathBuf::from("/dev/shm/dtmf_ctrl"))
                .category()
                .is_precondition()
        );
        assert!(Error::EmptyControlCode.category().is_precondition());
        assert!(!Error::EmptyCommand.category().is_precondition());
    }
}
