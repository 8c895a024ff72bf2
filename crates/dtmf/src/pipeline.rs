//! Control-code submission: existence check, render, execute.

use crate::error::Error;
use crate::executor::Executor;
use crate::result::ExecutionResult;
use crate::template::CommandTemplate;
use std::path::PathBuf;

/// Where and how a control code is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTarget {
    /// Template rendered for each submission
    pub template: CommandTemplate,
    /// Control device receiving the code
    pub device_path: PathBuf,
}

impl ControlTarget {
    /// Create a target from a template and a device path.
    pub fn new(template: CommandTemplate, device_path: impl Into<PathBuf>) -> Self {
        Self {
            template,
            device_path: device_path.into(),
        }
    }

    /// Device path as it is substituted into `{PTY_DEVICE}`.
    pub fn device_str(&self) -> std::borrow::Cow<'_, str> {
        self.device_path.to_string_lossy()
    }
}

/// Submits control codes through an [`Executor`].
///
/// Nothing is cached between submissions; every call reads the target it is
/// given.
#[derive(Debug)]
pub struct Pipeline<E: Executor> {
    executor: E,
}

impl<E: Executor> Pipeline<E> {
    /// Create a pipeline over `executor`.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Deliver one control code.
    ///
    /// A blank code or a missing device is rejected without invoking the
    /// executor, and the result then carries no command literal.
    pub fn submit(&self, code: &str, target: &ControlTarget) -> ExecutionResult {
        let code = code.trim();
        if code.is_empty() {
            return ExecutionResult::rejected(Error::EmptyControlCode);
        }

        if !target.device_path.exists() {
            log::info!(
                "Control device missing, not sending: {}",
                target.device_path.display()
            );
            return ExecutionResult::rejected(Error::DeviceMissing(target.device_path.clone()));
        }

        let command = target.template.render(code, &target.device_str());
        log::debug!("Rendered command: {command}");

        let result = self.executor.run(&command);
        log::info!(
            "Submitted {code}: {}",
            if result.succeeded { "ok" } else { "failed" }
        );
        result
    }
}
