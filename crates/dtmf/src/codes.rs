//! Built-in reference list of common SvxLink control codes.

/// A well-known control code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonCode {
    /// Digits to send
    pub code: &'static str,
    /// What the daemon does with it
    pub description: &'static str,
}

/// Codes understood by a stock SvxLink simplex setup with EchoLink.
pub const COMMON_CODES: &[CommonCode] = &[
    CommonCode {
        code: "*#",
        description: "Status / ID message",
    },
    CommonCode {
        code: "#",
        description: "Disconnect most recent station",
    },
    CommonCode {
        code: "##",
        description: "Disconnect all stations",
    },
    CommonCode {
        code: "2#",
        description: "Connect to EchoLink",
    },
    CommonCode {
        code: "2#570916#",
        description: "Connect to EchoLink RedChile",
    },
];

/// Look up the description of a known code.
pub fn describe(code: &str) -> Option<&'static str> {
    COMMON_CODES
        .iter()
        .find(|c| c.code == code.trim())
        .map(|c| c.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe("##"), Some("Disconnect all stations"));
        assert_eq!(describe(" *# "), Some("Status / ID message"));
        assert_eq!(describe("9#"), None);
    }

    #[test]
    fn test_codes_unique() {
        let mut codes: Vec<_> = COMMON_CODES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), COMMON_CODES.len());
    }
}
