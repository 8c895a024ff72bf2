//! Execution templates.
//!
//! A template is an operator-written shell command line with two slots:
//! ```text
//! printf '{DTMF_CODE}' | sudo -u svxlink tee {PTY_DEVICE} >/dev/null
//! ```
//! Substituted values are inserted verbatim. The template author owns the
//! shell quoting; the control code is untrusted payload placed wherever the
//! author put `{DTMF_CODE}`.

/// Placeholder replaced by the control code.
pub const CODE_PLACEHOLDER: &str = "{DTMF_CODE}";

/// Placeholder replaced by the control device path.
pub const DEVICE_PLACEHOLDER: &str = "{PTY_DEVICE}";

/// Template shipped as the initial default.
pub const DEFAULT_TEMPLATE: &str =
    "printf '{DTMF_CODE}' | sudo -u svxlink tee {PTY_DEVICE} >/dev/null";

/// Template used when stored settings cannot be read.
pub const FALLBACK_TEMPLATE: &str = "printf '{DTMF_CODE}' | tee {PTY_DEVICE} >/dev/null";

struct Slot<'a> {
    token: &'static str,
    value: &'a str,
}

/// An operator-defined command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    raw: String,
}

impl CommandTemplate {
    /// Wrap a template string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The template text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the template mentions the control code slot.
    pub fn uses_code(&self) -> bool {
        self.raw.contains(CODE_PLACEHOLDER)
    }

    /// Whether the template mentions the device slot.
    pub fn uses_device(&self) -> bool {
        self.raw.contains(DEVICE_PLACEHOLDER)
    }

    /// Render the template for one submission.
    pub fn render(&self, code: &str, device_path: &str) -> String {
        render(&self.raw, code, device_path)
    }
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// Substitute both placeholders in a single left-to-right pass.
///
/// Replacement text is never rescanned, so a control code that happens to
/// contain `{PTY_DEVICE}` is inserted literally.
pub fn render(template: &str, code: &str, device_path: &str) -> String {
    let slots = [
        Slot {
            token: CODE_PLACEHOLDER,
            value: code,
        },
        Slot {
            token: DEVICE_PLACEHOLDER,
            value: device_path,
        },
    ];

    let mut out = String::with_capacity(template.len() + code.len() + device_path.len());
    let mut rest = template;

    loop {
        let next = slots
            .iter()
            .filter_map(|slot| rest.find(slot.token).map(|pos| (pos, slot)))
            .min_by_key(|(pos, _)| *pos);

        match next {
            Some((pos, slot)) => {
                out.push_str(&rest[..pos]);
                out.push_str(slot.value);
                rest = &rest[pos + slot.token.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
