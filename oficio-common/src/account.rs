//! Debit-account canonicalization
//!
//! Two textual variants of the same bank account (with or without leading
//! zeros) must collapse to one key, or aggregation would split a debit
//! account across duplicate groups.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bank-style account number: leading zeros, a digit run, a hyphen and a
/// one-digit check digit.
static ACCOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0*(\d+)-(\d)").expect("account pattern is valid"));

/// Canonicalize a raw debit-account string into a stable grouping key.
///
/// The first `<digits>-<check digit>` substring is rewritten with leading
/// zeros stripped; anything else (including the empty string) passes through
/// unchanged rather than erroring.
pub fn normalize(raw: &str) -> String {
    match ACCOUNT_PATTERN.captures(raw) {
        Some(caps) => format!("{}-{}", &caps[1], &caps[2]),
        None => raw.to_string(),
    }
}
