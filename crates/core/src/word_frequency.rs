//! Word-frequency analysis over report text.
//!
//! Text is lower-cased and split into tokens, where a token is a maximal run
//! of ASCII letters, digits or `_`. Punctuation, whitespace and any other
//! character act as separators.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Minimum repetition count used when the caller does not supply one.
pub const DEFAULT_MIN_COUNT: u32 = 3;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]+").expect("valid regex"));

/// Split `text` into lower-cased word tokens, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Count how often each token occurs in `text`.
pub fn frequency_map(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Highest occurrence count of any single token, `0` for text without words.
pub fn max_frequency(text: &str) -> u32 {
    frequency_map(text).into_values().max().unwrap_or(0)
}

/// Whether some word occurs at least `min_count` times in `text`.
pub fn has_repeated_word(text: &str, min_count: u32) -> bool {
    max_frequency(text) >= min_count
}

/// Threshold actually applied for a requested `min_count`. Zero means "not
/// given" and falls back to [`DEFAULT_MIN_COUNT`].
pub fn effective_min_count(min_count: u32) -> u32 {
    if min_count == 0 {
        DEFAULT_MIN_COUNT
    } else {
        min_count
    }
}

/// Read a raw `minCount` query value leniently. Leading ASCII digits are
/// taken as the number; a missing, empty, non-numeric, negative or zero value
/// yields [`DEFAULT_MIN_COUNT`]. Never fails.
pub fn parse_min_count(raw: Option<&str>) -> u32 {
    let raw = raw.unwrap_or_default().trim();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let digits = &raw[..end];

    let value = match digits.parse::<u32>() {
        Ok(n) => n,
        // All digits but too large: no report can reach it anyway.
        Err(_) if !digits.is_empty() => u32::MAX,
        Err(_) => 0,
    };
    effective_min_count(value)
}
