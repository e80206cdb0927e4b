//! Label value sanitization.

use std::fmt;

/// Replace every character outside `[A-Za-z0-9]` with `_`.
///
/// Total and deterministic. The output has as many characters as the input.
/// Distinct names can map to the same label (`"A B"` and `"A.B"` both give
/// `"A_B"`); their series then share one value and the latest write wins.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Sanitized label value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn from_raw(raw: &str) -> Self {
        Label(sanitize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
