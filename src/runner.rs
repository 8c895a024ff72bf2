use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Run a command and capture output
pub fn run_capture(cmd: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute: {} {}", cmd, args.join(" ")))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Command failed: {}", stderr.trim())
    }
}

/// Split a configured command line and run it, capturing output
pub fn run_line(line: &str) -> Result<String> {
    let words = shell_words::split(line).with_context(|| format!("Invalid command: {line}"))?;
    let (cmd, args) = words
        .split_first()
        .with_context(|| format!("Empty command: {line:?}"))?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_capture(cmd, &args)
}

/// Check if a command exists
pub fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
