// src/process/utils.rs
use once_cell::sync::Lazy;
use regex::Regex;

// U+FEFF (BOM / zero-width no-break space) counts as whitespace here.
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+").expect("whitespace regex should compile"));

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// 1) Trim outer whitespace + collapse every inner whitespace run to one space.
pub fn trim_text(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw.trim_matches(is_space), " ")
        .into_owned()
}

/// 2) Short filename-safe fingerprint of `raw`.
///
/// Normalizes with [`trim_text`], keeps the first `length` characters
/// (character indices, so a word may be cut in half) and turns every
/// remaining whitespace run into `_`.
pub fn head_text(raw: &str, length: usize) -> String {
    let head: String = trim_text(raw).chars().take(length).collect();
    WHITESPACE_RUN.replace_all(&head, "_").into_owned()
}
