//! Sentinel-wrapped shell executor.
//!
//! The rendered command runs as
//! ```text
//! sh -c "bash -c '<command>' 2>&1; printf '\nEXIT_CODE:%d\n' \"$?\""
//! ```
//! so stderr is folded into stdout and the status of the last pipeline
//! stage is printed after everything the command wrote.

use super::{Executor, SENTINEL, parse_sentinel};
use crate::error::Error;
use crate::result::ExecutionResult;
use std::process::{Command, Stdio};

/// Default shell interpreting the rendered command.
pub const DEFAULT_SHELL: &str = "bash";

/// Outer wrapper that runs the shell and prints the sentinel.
const WRAPPER: &str = "sh";

/// Executor that runs commands through a shell and recovers their status
/// from a trailing sentinel line.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    wrapper: &'static str,
}

impl ShellExecutor {
    /// Executor using [`DEFAULT_SHELL`].
    pub fn new() -> Self {
        Self::with_shell(DEFAULT_SHELL)
    }

    /// Executor using a specific shell program for the command itself.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            wrapper: WRAPPER,
        }
    }

    /// Shell program interpreting the command.
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Build the wrapper script for `shell_line`.
    pub fn wrap(&self, shell_line: &str) -> String {
        format!(
            r#"{} -c {} 2>&1; printf '\n{}:%d\n' "$?""#,
            shell_words::quote(&self.shell),
            shell_words::quote(shell_line),
            SENTINEL
        )
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for ShellExecutor {
    fn run(&self, shell_line: &str) -> ExecutionResult {
        if shell_line.trim().is_empty() {
            return ExecutionResult::failed(shell_line, Error::EmptyCommand);
        }

        let wrapped = self.wrap(shell_line);
        log::debug!("Executing: {shell_line}");
        log::trace!("Wrapper script: {wrapped}");

        let output = match Command::new(self.wrapper)
            .arg("-c")
            .arg(&wrapped)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(source) => {
                return ExecutionResult::failed(
                    shell_line,
                    Error::Spawn {
                        program: self.wrapper.to_string(),
                        source,
                    },
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);

        match parse_sentinel(&stdout) {
            Some((0, captured)) => {
                log::debug!("Command exited 0");
                ExecutionResult::success(shell_line, captured)
            }
            Some((status, captured)) => {
                log::debug!("Command exited {status}");
                ExecutionResult::failed(
                    shell_line,
                    Error::ExecutionFailed {
                        status,
                        output: captured,
                    },
                )
            }
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let captured = [stdout.trim(), stderr.trim()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");

                let error = if output.status.success() {
                    Error::SentinelMissing { output: captured }
                } else {
                    Error::WrapperFailed {
                        code: output.status.code(),
                        output: captured,
                    }
                };
                log::warn!("No exit status recovered: {error}");
                ExecutionResult::failed(shell_line, error)
            }
        }
    }
}
