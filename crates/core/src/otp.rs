//! Verification-code extraction from SMS text.
//!
//! Incoming messages carry one-time codes in a handful of shapes. The
//! patterns are tried in order and the first capture wins: bare 6-digit
//! codes, bare 4-digit codes, then the labeled `kod:` / `code:` forms in
//! Turkish and English.

use std::sync::LazyLock;

use regex::Regex;

static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b([0-9]{6})\b",
        r"\b([0-9]{4})\b",
        r"(?i)\bkod\s*:?\s*([0-9A-Za-z]{4,8})",
        r"(?i)\bcode\s*:?\s*([0-9A-Za-z]{4,8})",
        r"(?i)\bverification\s*code\s*:?\s*([0-9A-Za-z]{4,8})",
        r"(?i)doğrulama\s*kodu\s*:?\s*([0-9A-Za-z]{4,8})",
        r"(?i)onay\s*kodu\s*:?\s*([0-9A-Za-z]{4,8})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Extract a verification code from message text.
///
/// Returns `None` when no pattern matches. Callers that already hold a
/// provider-supplied code should prefer it over extraction.
pub fn extract_code(text: &str) -> Option<String> {
    CODE_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
