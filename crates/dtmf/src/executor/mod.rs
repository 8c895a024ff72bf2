//! Executor abstraction for running rendered command lines.
//!
//! The [`Executor`] trait is the only seam through which control codes reach
//! an external process, allowing for different implementations (the real
//! sentinel-wrapped shell, recording mocks for testing).

pub mod shell;

use crate::result::ExecutionResult;
use regex::Regex;
use std::sync::LazyLock;

pub use shell::ShellExecutor;

/// Marker printed after the command with its exit status.
pub const SENTINEL: &str = "EXIT_CODE";

static SENTINEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)\A(.*){SENTINEL}:(\d+)\s*\z")).expect("valid sentinel regex")
});

/// Runs one shell command line and reports how it went.
pub trait Executor {
    /// Run `shell_line` to completion.
    ///
    /// Never panics on command failure; every outcome is an
    /// [`ExecutionResult`].
    fn run(&self, shell_line: &str) -> ExecutionResult;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn run(&self, shell_line: &str) -> ExecutionResult {
        (**self).run(shell_line)
    }
}

/// Split captured wrapper output into the command's own output and the
/// status carried by the trailing sentinel.
///
/// Returns `None` when the stream does not end with a parseable sentinel.
/// The returned output is trimmed.
pub fn parse_sentinel(captured: &str) -> Option<(i32, String)> {
    let caps = SENTINEL_RE.captures(captured)?;
    let status = caps.get(2)?.as_str().parse::<i32>().ok()?;
    let output = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
    Some((status, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentinel_success() {
        assert_eq!(parse_sentinel("\nEXIT_CODE:0\n"), Some((0, String::new())));
    }

    #[test]
    fn test_parse_sentinel_with_output() {
        assert_eq!(
            parse_sentinel("tee: /dev/shm/x: Permission denied\n\nEXIT_CODE:1\n"),
            Some((1, "tee: /dev/shm/x: Permission denied".to_string()))
        );
    }

    #[test]
    fn test_parse_sentinel_takes_last_marker() {
        assert_eq!(
            parse_sentinel("EXIT_CODE:0\nmore\nEXIT_CODE:3\n"),
            Some((3, "EXIT_CODE:0\nmore".to_string()))
        );
    }

    #[test]
    fn test_parse_sentinel_without_newline_before_marker() {
        assert_eq!(
            parse_sentinel("partialEXIT_CODE:0"),
            Some((0, "partial".to_string()))
        );
    }

    #[test]
    fn test_parse_sentinel_missing() {
        assert_eq!(parse_sentinel(""), None);
        assert_eq!(parse_sentinel("some output\n"), None);
        assert_eq!(parse_sentinel("EXIT_CODE:0\ntrailing output"), None);
        assert_eq!(parse_sentinel("EXIT_CODE:abc\n"), None);
    }

    #[test]
    fn test_parse_sentinel_overflow() {
        assert_eq!(parse_sentinel("EXIT_CODE:99999999999999\n"), None);
    }
}
