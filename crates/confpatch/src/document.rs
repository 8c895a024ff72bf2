//! Line-preserving snapshot of a section-structured configuration file.

use crate::error::{Error, Result};
use crate::line::section_header;
use std::path::Path;

/// Ordered raw lines of a configuration file plus the section each line
/// belongs to.
///
/// Lines are newline-exclusive byte strings. Only `\n` separates lines, so a
/// trailing `\r` stays part of the line and untouched CRLF lines round-trip
/// unchanged. Bytes that are not valid UTF-8 are kept as read; matching works
/// on a lossy text view of each line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    raw: Vec<Vec<u8>>,
    lines: Vec<String>,
    sections: Vec<Option<String>>,
    trailing_newline: bool,
}

impl ConfigDocument {
    /// Parse a document from text content.
    pub fn parse(content: &str) -> Self {
        Self::parse_bytes(content.as_bytes())
    }

    /// Parse a document from raw file content.
    pub fn parse_bytes(content: &[u8]) -> Self {
        let trailing_newline = content.ends_with(b"\n");
        let body = content.strip_suffix(b"\n").unwrap_or(content);
        let raw = if content.is_empty() {
            Vec::new()
        } else {
            body.split(|b| *b == b'\n').map(<[u8]>::to_vec).collect()
        };
        Self::from_raw(raw, trailing_newline)
    }

    /// Build a document from already-split raw lines.
    pub fn from_raw(raw: Vec<Vec<u8>>, trailing_newline: bool) -> Self {
        let lines: Vec<String> = raw
            .iter()
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect();

        let mut current: Option<String> = None;
        let sections = lines
            .iter()
            .map(|line| {
                if let Some(name) = section_header(line) {
                    current = Some(name.to_string());
                }
                current.clone()
            })
            .collect();

        Self {
            raw,
            lines,
            sections,
            trailing_newline,
        }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} ({} bytes)", path.display(), content.len());
        Ok(Self::parse_bytes(&content))
    }

    /// Text view of every line, in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every line exactly as read.
    pub fn raw_lines(&self) -> &[Vec<u8>] {
        &self.raw
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the source ended with a newline.
    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Name of the section enclosing line `index` (`None` before the first
    /// header or out of range).
    pub fn section_of(&self, index: usize) -> Option<&str> {
        self.sections.get(index).and_then(|s| s.as_deref())
    }

    /// Index of the first header introducing `section` (exact name match).
    pub fn find_header(&self, section: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| section_header(line) == Some(section))
    }

    /// Index one past the last line of the region started by the header at
    /// `header_index`: the next header, or the end of the document.
    pub fn region_end(&self, header_index: usize) -> usize {
        self.lines
            .iter()
            .enumerate()
            .skip(header_index + 1)
            .find(|(_, line)| section_header(line).is_some())
            .map_or(self.lines.len(), |(i, _)| i)
    }

    /// Serialize back to the exact file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        serialize_lines(&self.raw, self.trailing_newline)
    }

    /// Serialize to text, replacing invalid UTF-8 for display.
    pub fn to_content(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

/// Join raw lines with `\n`, restoring the trailing newline when requested.
pub fn serialize_lines(lines: &[Vec<u8>], trailing_newline: bool) -> Vec<u8> {
    let mut content = lines.join(&b'\n');
    if trailing_newline && !lines.is_empty() {
        content.push(b'\n');
    }
    content
}
