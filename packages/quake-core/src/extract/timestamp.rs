//! Timestamp pattern scanning.
//!
//! The source page merges the local and UTC timestamps into one cell with no
//! reliable separator, so extraction is a pattern scan rather than a split.
//! The same scan is reused by the novelty gate to parse stored markers that
//! may predate normalization.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// Date and time captured separately so irregular inner whitespace can be
/// normalized to a single space.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2})").unwrap()
});

/// All `YYYY-MM-DD HH:MM:SS` substrings in `text`, in document order.
pub fn scan_timestamps(text: &str) -> Vec<String> {
    TIMESTAMP_RE
        .captures_iter(text)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
        .collect()
}

/// Tolerant ordering-key parse: re-scan `text` for the first timestamp
/// pattern, then parse it. Returns `None` when no well-formed timestamp is
/// present anywhere in the string.
pub fn parse_ordering_key(text: &str) -> Option<NaiveDateTime> {
    let first = scan_timestamps(text).into_iter().next()?;
    NaiveDateTime::parse_from_str(&first, "%Y-%m-%d %H:%M:%S").ok()
}
