//! Bilingual location splitter.
//!
//! Location cells carry a Thai name and usually an English transliteration
//! in one blob of free text. The split point is found by an ordered fallback
//! chain; every index comes from a regex search so multi-byte Thai text
//! never needs manual offset arithmetic.

use std::sync::LazyLock;

use regex::Regex;

/// Markup artifact on the source page: the Thai district abbreviation `ต`
/// sometimes gets whitespace inserted before its trailing dot.
static TAMBON_ABBREV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ต\s+\.").unwrap());

/// The last Thai-block character of the string together with everything
/// after it. Thai text is full of ASCII dots and spaces (`อ.`, `จ.`), so the
/// split must anchor on the string tail rather than on the first Thai char
/// followed by a non-Thai one; the split index is computed from the match
/// start.
static THAI_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{0E00}-\x{0E7F}][^\x{0E00}-\x{0E7F}]*$").unwrap());

static LATIN_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").unwrap());

/// Split free location text into `(thai, english)`.
///
/// Fallback chain, first hit wins:
/// 1. explicit line break
/// 2. non-Thai text trailing the last Thai character of the string (English
///    names that embed Thai abbreviations further in would fool an earlier
///    boundary, and the dots inside Thai abbreviations would fool a
///    first-boundary scan)
/// 3. first Latin letter
/// 4. no split: everything is the Thai name
pub fn split_location(text: &str) -> (String, String) {
    let text = text.trim();
    let text = TAMBON_ABBREV_RE.replace_all(text, "ต.");

    if let Some(pos) = text.find('\n') {
        let (thai, english) = text.split_at(pos);
        return (thai.trim().to_string(), english.trim().to_string());
    }

    if let Some(m) = THAI_TAIL_RE.find(&text) {
        let thai_char_len = m
            .as_str()
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
        let (thai, english) = text.split_at(m.start() + thai_char_len);
        // Pure-Thai text matches with an empty tail; that is not a split.
        if !english.trim().is_empty() {
            return (thai.trim().to_string(), english.trim().to_string());
        }
    }

    if let Some(m) = LATIN_LETTER_RE.find(&text) {
        let (thai, english) = text.split_at(m.start());
        return (thai.trim().to_string(), english.trim().to_string());
    }

    (text.trim().to_string(), String::new())
}
