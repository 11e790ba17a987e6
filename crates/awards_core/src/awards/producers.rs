//! Producer credit parsing.

use once_cell::sync::Lazy;
use regex::Regex;

// `and` is matched case-sensitively and only as a whitespace-delimited word.
static PRODUCER_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\s+and\s+").expect("valid producer separator regex"));

/// Splits a raw producer credit string into trimmed producer names.
///
/// Names keep their order of appearance. Duplicates are preserved and empty
/// tokens are dropped, so blank or separator-only credits yield no names.
pub fn split_producers(credits: &str) -> Vec<&str> {
    PRODUCER_SEPARATOR_RE
        .split(credits)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}
