//! Canonicalization of raw terms into abbreviation lookup keys.
//!
//! Abbreviation tables are keyed by a normalized form of the term, so that
//! "The Modern Law Review" and "Modern law review." resolve to the same
//! entry. Identifier-like variables (`jurisdiction`, `country`) are
//! upper-cased verbatim instead; their values are codes, not prose.

use once_cell::sync::Lazy;
use regex::Regex;

/// Function words (multilingual articles/conjunctions) as whole tokens, plus
/// the punctuation ranges stripped from prose keys. The pipe separator
/// (`\x7C`) is deliberately excluded from the class; it is collapsed, not
/// removed.
static STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b|^)(?:and|et|y|und|l[ae]|the|[ld]')(?:\b|$)|[\x21-\x2C.\x2F\x3A-\x40\x5B-\x60\x7B\x7D-\x7E]")
        .unwrap()
});

static PIPE_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|\s*").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw string into the key form used by abbreviation tables.
///
/// `variable` selects the branch: `jurisdiction` and `country` values are
/// identifier-like and are upper-cased verbatim; everything else is treated
/// as prose and stripped, collapsed, and lower-cased. An absent raw value is
/// the empty string. The result always normalizes to itself.
pub fn normalize_key(variable: &str, raw: Option<&str>) -> String {
    let key = raw.unwrap_or("").trim();
    if matches!(variable, "jurisdiction" | "country") {
        return key.to_uppercase();
    }
    // A strip can uncover a new function word ("t.he" -> "the"), so rerun
    // until stable; a normalized key must normalize to itself.
    let mut key = key.to_string();
    loop {
        let next = STRIP.replace_all(&key, "").into_owned();
        if next == key {
            break;
        }
        key = next;
    }
    let key = PIPE_SPACING.replace_all(&key, "|");
    let key = key.replace('.', " ");
    let key = WHITESPACE.replace_all(&key, " ");
    key.trim().to_lowercase()
}
