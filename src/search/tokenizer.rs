use regex::Regex;
use std::sync::LazyLock;

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());
static NON_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z]+").unwrap());

/// Turns one raw whitespace-delimited token into an indexable word.
///
/// A token containing any ASCII digit is rejected as a whole (`"abc123"`
/// yields nothing, not `"abc"`). Otherwise every character that is not an
/// ASCII letter is dropped and the rest is lowercased. Returns `None` when
/// nothing is left.
pub fn normalize_token(token: &str) -> Option<String> {
    if DIGIT.is_match(token) {
        return None;
    }

    let word = NON_LETTER.replace_all(token, "").to_ascii_lowercase();
    if word.is_empty() { None } else { Some(word) }
}

/// Splits text on ASCII whitespace and normalizes every token, in order and
/// with repetitions. Rejected tokens come through as `None` so callers can
/// count them.
///
/// Other Unicode spacing (`U+00A0`, `U+2003`, ...) is not a separator; it is
/// stripped like any other non-letter, so `"foo\u{a0}bar"` is one word.
pub fn tokenize_text(text: &str) -> impl Iterator<Item = Option<String>> + '_ {
    text.split_ascii_whitespace().map(normalize_token)
}
