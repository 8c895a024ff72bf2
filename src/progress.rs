//! Progress indicators for blocking external commands.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a spinner for an operation of unknown length
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run `f` behind a spinner unless output is suppressed
pub fn with_spinner<T>(quiet: bool, message: &str, f: impl FnOnce() -> T) -> T {
    if quiet {
        return f();
    }
    let pb = spinner(message);
    let result = f();
    pb.finish_and_clear();
    result
}
