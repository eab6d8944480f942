//! Error and status code detection.

use std::sync::LazyLock;

use regex::Regex;

static ERROR_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Error|Code|Status)\s?(?:[0-9]{3,4}|0x[0-9A-F]+)\b").unwrap()
});

/// Returns the first "Error 404" / "Status 0x80070005" style phrase, as written.
pub fn detect_error_code(text: &str) -> Option<String> {
    ERROR_CODE_RE.find(text).map(|m| m.as_str().to_string())
}
