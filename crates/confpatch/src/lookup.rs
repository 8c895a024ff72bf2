//! Read-only value lookup.

use crate::document::ConfigDocument;
use crate::line::{KeyLine, section_header};

/// Find the active value of `key` inside `section`.
///
/// The section header is matched case-insensitively and the scan stops being
/// "inside" at any other header. The first uncommented `key = value` line
/// (key case-insensitive) with a non-empty value wins.
pub fn lookup<'a>(document: &'a ConfigDocument, section: &str, key: &str) -> Option<&'a str> {
    let mut inside = false;

    for line in document.lines() {
        if let Some(name) = section_header(line) {
            inside = name.eq_ignore_ascii_case(section);
            continue;
        }
        if !inside {
            continue;
        }
        if let Some(key_line) = KeyLine::parse(line)
            && !key_line.commented
            && key_line.is_key(key)
            && !key_line.value.is_empty()
        {
            return Some(key_line.value);
        }
    }

    None
}

/// Like [`lookup`], falling back to `default` when the key is not active.
pub fn lookup_or<'a>(
    document: &'a ConfigDocument,
    section: &str,
    key: &str,
    default: &'a str,
) -> &'a str {
    lookup(document, section, key).unwrap_or(default)
}
