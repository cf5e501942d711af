//! Entity-tag rendering and `If-Match` precondition parsing.
//!
//! A widget's version is surfaced to clients as a strong entity tag: version
//! `2` becomes the three characters `"2"`. Clients echo it back in `If-Match`
//! either in that quoted form or as a bare integer.

use crate::types::Version;

/// Render a version as a strong entity tag, e.g. `2` -> `"2"`.
pub fn format_etag(version: Version) -> String {
    format!("\"{version}\"")
}

/// A parsed `If-Match` header value: the one version the caller last saw.
///
/// `expected` is `None` when the value is not a single version, and such a
/// precondition matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precondition {
    expected: Option<Version>,
}

impl Precondition {
    /// Parse an `If-Match` header value.
    ///
    /// Accepts exactly one version, as a bare integer (`2`) or a strong tag
    /// (`"2"`). Wildcards (`*`), lists (`"1", "2"`), weak tags (`W/"2"`) and
    /// anything else never match.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(raw);
        Self {
            expected: unquoted.parse::<Version>().ok(),
        }
    }

    /// A precondition that no version satisfies.
    pub fn unsatisfiable() -> Self {
        Self { expected: None }
    }

    pub fn expected(&self) -> Option<Version> {
        self.expected
    }

    /// Whether the caller's token equals the widget's current version.
    pub fn matches(&self, current: Version) -> bool {
        self.expected == Some(current)
    }
}
