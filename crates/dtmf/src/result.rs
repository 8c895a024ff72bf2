//! Outcome of a single control-code submission.

use crate::error::Error;

/// What one submission produced.
///
/// Built once per submission and handed straight back to the caller.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Whether the recovered exit status was 0
    pub succeeded: bool,
    /// Recovered exit status, `None` when nothing ran or no status was found
    pub exit_status: Option<i32>,
    /// Combined stdout/stderr of the command, sentinel removed and trimmed
    pub output: String,
    /// Literal command line that was executed, `None` if nothing was executed
    pub command: Option<String>,
    /// Why the submission failed
    pub failure: Option<Error>,
}

impl ExecutionResult {
    /// The command ran and exited 0.
    pub fn success(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            exit_status: Some(0),
            output: output.into(),
            command: Some(command.into()),
            failure: None,
        }
    }

    /// The command ran (or was attempted) and failed.
    pub fn failed(command: impl Into<String>, error: Error) -> Self {
        let output = match &error {
            Error::ExecutionFailed { output, .. }
            | Error::SentinelMissing { output }
            | Error::WrapperFailed { output, .. } => output.clone(),
            _ => String::new(),
        };
        Self {
            succeeded: false,
            exit_status: error.exit_status(),
            output,
            command: Some(command.into()),
            failure: Some(error),
        }
    }

    /// The submission was rejected before anything was executed.
    pub fn rejected(error: Error) -> Self {
        Self {
            succeeded: false,
            exit_status: None,
            output: String::new(),
            command: None,
            failure: Some(error),
        }
    }

    /// Operator-facing summary line.
    pub fn message(&self) -> String {
        match &self.failure {
            Some(error) => error.to_string(),
            None => "Control code sent".to_string(),
        }
    }
}
