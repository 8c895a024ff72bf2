//! Line-level classification.
//!
//! Handles the two line shapes the patcher cares about:
//! ```text
//! [SimplexLogic]
//! DTMF_CTRL_PTY=/dev/shm/dtmf_ctrl
//! #CALLSIGN = N0CALL
//! ```
//! Everything else (blank lines, free-form comments) is opaque.

use regex::Regex;
use std::sync::LazyLock;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\]").expect("valid header regex"));

static KEY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?\s*([A-Za-z0-9_]+)\s*=\s*(.*)$").expect("valid key line regex")
});

static KEY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid key name regex"));

/// Return the section name if `line` is a `[Section]` header.
pub fn section_header(line: &str) -> Option<&str> {
    HEADER_RE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `name` is usable as a configuration key.
pub fn is_valid_key(name: &str) -> bool {
    KEY_NAME_RE.is_match(name)
}

/// A `KEY=VALUE` line, possibly commented out with a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLine<'a> {
    /// Key as spelled in the file
    pub key: &'a str,
    /// Value text after `=`, surrounding whitespace removed
    pub value: &'a str,
    /// Whether the line starts with `#`
    pub commented: bool,
}

impl<'a> KeyLine<'a> {
    /// Parse a raw line. Returns `None` for anything that is not a key line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let trimmed = line.trim();
        let caps = KEY_LINE_RE.captures(trimmed)?;
        let key = caps.get(1)?.as_str();
        let value = caps.get(2).map_or("", |m| m.as_str().trim_end());
        Some(Self {
            key,
            value,
            commented: trimmed.starts_with('#'),
        })
    }

    /// Case-insensitive key identity.
    pub fn is_key(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}

/// Render an active `KEY=VALUE` line.
pub fn render_active(key: &str, value: &str) -> String {
    format!("{key}={value}")
}

/// Render a commented-out `#KEY=VALUE` line.
pub fn render_commented(key: &str, value: &str) -> String {
    format!("#{key}={value}")
}
