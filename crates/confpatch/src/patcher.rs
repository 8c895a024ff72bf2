//! The patch pass.
//!
//! Walks the document once, rewriting only lines named by the request, then
//! inserts governed keys that were enabled but never seen. Nothing here
//! touches the filesystem.

use crate::document::{ConfigDocument, serialize_lines};
use crate::error::Error;
use crate::line::{KeyLine, render_active, render_commented, section_header};
use crate::request::{Toggle, UpdateRequest, is_flag_name};

/// What happened to a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Plain value replaced in place
    Replaced,
    /// Governed key written active in place
    Enabled,
    /// Governed key commented out in place
    Disabled,
    /// Governed key appended to its section
    Inserted,
}

/// A line the patch produced or rewrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Index of the line in the patched output
    pub index: usize,
    /// Key as written
    pub key: String,
    /// Kind of edit
    pub kind: EditKind,
}

/// Result of a patch pass.
#[derive(Debug)]
pub struct PatchOutcome {
    /// Text view of the full replacement line sequence
    pub lines: Vec<String>,
    raw: Vec<Vec<u8>>,
    /// Whether the source ended with a newline
    pub trailing_newline: bool,
    /// Lines rewritten or inserted
    pub edits: Vec<Edit>,
    /// Insertions that could not be performed
    pub skipped: Vec<Error>,
}

impl PatchOutcome {
    fn new(raw: Vec<Vec<u8>>, trailing_newline: bool, edits: Vec<Edit>, skipped: Vec<Error>) -> Self {
        let lines = raw
            .iter()
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect();
        Self {
            lines,
            raw,
            trailing_newline,
            edits,
            skipped,
        }
    }

    /// Patched lines exactly as they will be written.
    pub fn raw_lines(&self) -> &[Vec<u8>] {
        &self.raw
    }

    /// Serialize the patched lines to file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        serialize_lines(&self.raw, self.trailing_newline)
    }

    /// Serialize to text, replacing invalid UTF-8 for display.
    pub fn to_content(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    /// Whether the output differs from `original`.
    pub fn differs_from(&self, original: &ConfigDocument) -> bool {
        self.raw.as_slice() != original.raw_lines()
    }

    /// Turn the output into a fresh document snapshot.
    pub fn into_document(self) -> ConfigDocument {
        ConfigDocument::from_raw(self.raw, self.trailing_newline)
    }
}

/// Apply `request` to `document`, producing a full replacement line sequence.
///
/// A governed key is rewritten at its first occurrence in its section. Later
/// active occurrences there are commented out, so at most one active line
/// remains.
pub fn patch(document: &ConfigDocument, request: &UpdateRequest) -> PatchOutcome {
    let toggles = request.toggles();
    let values = request.values();

    let mut raw: Vec<Vec<u8>> = Vec::with_capacity(document.len() + toggles.len());
    let mut edits = Vec::new();
    let mut handled = vec![false; toggles.len()];
    let mut consumed = vec![false; values.len()];

    for (index, (line, original)) in document.lines().iter().zip(document.raw_lines()).enumerate() {
        if section_header(line).is_some() {
            raw.push(original.clone());
            continue;
        }

        let Some(key_line) = KeyLine::parse(line) else {
            raw.push(original.clone());
            continue;
        };

        if let Some(i) = governing_toggle(toggles, &key_line, document.section_of(index)) {
            let toggle = &toggles[i];
            let key = &toggle.governed.key;

            if handled[i] {
                if key_line.commented {
                    raw.push(original.clone());
                } else {
                    let rendered = render_commented(key_line.key, key_line.value);
                    log::debug!(
                        "Commenting out duplicate {key} in [{}]: {rendered}",
                        toggle.governed.section
                    );
                    edits.push(Edit {
                        index: raw.len(),
                        key: key.clone(),
                        kind: EditKind::Disabled,
                    });
                    raw.push(rendered.into_bytes());
                }
                continue;
            }

            let value = toggle.effective_value();
            let (rendered, kind) = if toggle.enabled {
                (render_active(key, value), EditKind::Enabled)
            } else {
                (render_commented(key, value), EditKind::Disabled)
            };
            log::trace!("Toggled {key} in [{}]: {rendered}", toggle.governed.section);

            handled[i] = true;
            edits.push(Edit {
                index: raw.len(),
                key: key.clone(),
                kind,
            });
            raw.push(rendered.into_bytes());
            continue;
        }

        let matched = values
            .iter()
            .enumerate()
            .find(|(j, (name, _))| !consumed[*j] && !is_flag_name(name) && key_line.is_key(name));

        match matched {
            Some((j, (_, value))) => {
                consumed[j] = true;
                let rendered = render_active(key_line.key, value);
                log::trace!("Replaced {}: {rendered}", key_line.key);
                edits.push(Edit {
                    index: raw.len(),
                    key: key_line.key.to_string(),
                    kind: EditKind::Replaced,
                });
                raw.push(rendered.into_bytes());
            }
            None => raw.push(original.clone()),
        }
    }

    let mut skipped = Vec::new();
    let mut insertions = Vec::new();
    for (toggle, _) in toggles
        .iter()
        .zip(&handled)
        .filter(|(t, seen)| t.enabled && !**seen)
    {
        match insertion_point(document, toggle) {
            Some(index) => insertions.push((index, toggle)),
            None => {
                log::debug!(
                    "Section [{}] missing, not inserting {}",
                    toggle.governed.section,
                    toggle.governed.key
                );
                skipped.push(Error::SectionNotFound {
                    section: toggle.governed.section.clone(),
                    key: toggle.governed.key.clone(),
                });
            }
        }
    }

    // Insert back to front so earlier positions stay valid; equal positions
    // keep request order.
    insertions.sort_by_key(|(index, _)| *index);
    for &(index, toggle) in insertions.iter().rev() {
        let rendered = render_active(&toggle.governed.key, toggle.effective_value());
        log::trace!("Inserted into [{}]: {rendered}", toggle.governed.section);
        raw.insert(index, rendered.into_bytes());
        for edit in edits.iter_mut().filter(|e| e.index >= index) {
            edit.index += 1;
        }
        edits.push(Edit {
            index,
            key: toggle.governed.key.clone(),
            kind: EditKind::Inserted,
        });
    }

    edits.sort_by_key(|e| e.index);

    PatchOutcome::new(raw, document.has_trailing_newline(), edits, skipped)
}

/// Index of the toggle governing `key_line` when it sits in its section.
fn governing_toggle(toggles: &[Toggle], key_line: &KeyLine<'_>, section: Option<&str>) -> Option<usize> {
    toggles.iter().position(|t| {
        key_line.key == t.governed.key && section == Some(t.governed.section.as_str())
    })
}

/// End of the first region of the toggle's section, or `None` if the section
/// is absent.
fn insertion_point(document: &ConfigDocument, toggle: &Toggle) -> Option<usize> {
    let header = document.find_header(&toggle.governed.section)?;
    Some(document.region_end(header))
}
