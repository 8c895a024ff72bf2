//! # dtmf
//!
//! Templated delivery of DTMF control codes to a daemon's control device.
//!
//! This crate provides functionality for:
//! - Rendering operator-written command templates with `{DTMF_CODE}` and
//!   `{PTY_DEVICE}` slots
//! - Running the rendered command through a shell and recovering its exit
//!   status from a trailing sentinel line
//! - Probing the control device without opening it
//!
//! ## Example
//!
//! ```no_run
//! use dtmf::{CommandTemplate, ControlTarget, Pipeline, ShellExecutor};
//!
//! let pipeline = Pipeline::new(ShellExecutor::new());
//! let target = ControlTarget::new(CommandTemplate::default(), "/dev/shm/dtmf_ctrl");
//!
//! let result = pipeline.submit("*#", &target);
//! println!("{}", result.message());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codes;
pub mod device;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod result;
pub mod template;

pub use codes::{COMMON_CODES, CommonCode, describe};
pub use device::DeviceStatus;
pub use error::{Error, ErrorCategory};
pub use executor::{Executor, ShellExecutor};
pub use pipeline::{ControlTarget, Pipeline};
pub use result::ExecutionResult;
pub use template::{CommandTemplate, DEFAULT_TEMPLATE, FALLBACK_TEMPLATE, render};
