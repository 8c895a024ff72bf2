//! Update requests handed to the patcher.

use crate::error::{Error, Result};
use crate::line::is_valid_key;

/// Reserved suffix marking an enable flag in form-style input.
pub const ENABLED_SUFFIX: &str = "_enabled";

/// A key whose presence is toggled by commenting it in or out, scoped to a
/// single section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernedKey {
    /// Governing section name
    pub section: String,
    /// Key name, matched exactly inside the governing section
    pub key: String,
    /// Value used when the request supplies none
    pub default_value: String,
}

impl GovernedKey {
    /// Describe a governed key.
    pub fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            default_value: default_value.into(),
        }
    }

    /// Name of the form field carrying this key's enable flag.
    pub fn flag_name(&self) -> String {
        format!("{}{ENABLED_SUFFIX}", self.key)
    }
}

/// Enable/disable instruction for a governed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    /// The governed key
    pub governed: GovernedKey,
    /// Whether the key should end up active
    pub enabled: bool,
    /// Explicit value, if the caller supplied one
    pub value: Option<String>,
}

impl Toggle {
    /// Value to write: the explicit one or the governed default.
    pub fn effective_value(&self) -> &str {
        self.value
            .as_deref()
            .unwrap_or(&self.governed.default_value)
    }
}

/// One patch request: plain value replacements plus governed toggles.
///
/// Plain updates keep their insertion order; the first entry matching a line
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    values: Vec<(String, String)>,
    toggles: Vec<Toggle>,
}

impl UpdateRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain `KEY=VALUE` replacement.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Add a governed toggle.
    pub fn toggle(mut self, governed: GovernedKey, enabled: bool, value: Option<String>) -> Self {
        self.toggles.push(Toggle {
            governed,
            enabled,
            value,
        });
        self
    }

    /// Build a request from flat form-style pairs.
    ///
    /// For each governed key `K`, `K_enabled=1` enables it (anything else, or
    /// no flag at all, disables it) and `K=V` supplies its value. Every pair
    /// is also kept as a plain update; names ending in `_enabled` are never
    /// applied as plain updates.
    pub fn from_form<I, K, V>(pairs: I, governed: &[GovernedKey]) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let lookup = |name: &str| {
            values
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };

        let toggles = governed
            .iter()
            .map(|g| Toggle {
                governed: g.clone(),
                enabled: lookup(&g.flag_name()).is_some_and(|v| v == "1"),
                value: lookup(&g.key),
            })
            .collect();

        Self { values, toggles }
    }

    /// Parse `KEY=VALUE` assignments (e.g. from the command line).
    pub fn parse_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self> {
        let mut request = Self::new();
        for raw in assignments {
            let raw = raw.as_ref();
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| Error::InvalidAssignment(raw.to_string()))?;
            let key = key.trim();
            if !is_valid_key(key) {
                return Err(Error::InvalidKey(key.to_string()));
            }
            request = request.set(key, value.trim());
        }
        Ok(request)
    }

    /// Plain replacements in request order.
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// Governed toggles.
    pub fn toggles(&self) -> &[Toggle] {
        &self.toggles
    }

    /// Value supplied for `key` as a plain entry, if any.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.toggles.is_empty()
    }
}

/// Whether a request entry name is an enable flag rather than a key.
pub fn is_flag_name(name: &str) -> bool {
    name.ends_with(ENABLED_SUFFIX)
}
