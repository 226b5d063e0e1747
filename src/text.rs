//! Word tokenization and per-article frequency counting.
//!
//! Article text is lowercased and split into word tokens; each article
//! produces a [`LocalFrequency`] that is later merged into the shared
//! statistics table by the worker that built it.

use crate::models::LocalFrequency;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one word token: letters, digits, and inner apostrophes/hyphens
/// (so "don't" and "low-bandwidth" count as single words).
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+(?:['’-][\p{Alphabetic}\p{N}]+)*").unwrap());

/// Count word occurrences in a block of article text.
///
/// The text is lowercased before tokenization, so counts are
/// case-insensitive. Empty tokens never occur by construction.
///
/// # Arguments
///
/// * `text` - The extracted article text
///
/// # Returns
///
/// A [`LocalFrequency`] mapping each normalized word to its occurrence count.
pub fn word_frequency(text: &str) -> LocalFrequency {
    let lowered = text.to_lowercase();
    let mut freq = LocalFrequency::new();
    for m in WORD_RE.find_iter(&lowered) {
        *freq.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    freq
}
