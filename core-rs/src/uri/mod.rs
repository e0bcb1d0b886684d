//! Identifier generation for new individuals
//!
//! ## Format
//!
//! ```text
//! {base}{ClassSegment}/{encoded-label}-{millis}
//! https://ontology.local/individuals/Dog/ktb-1763656265921
//! ```
//!
//! The class segment is the last path or fragment component of the class
//! identifier. The label is slugged and run through a fixed substitution
//! alphabet; it is scrambled, not protected. The trailing number is a
//! millisecond timestamp that never repeats within the process.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::trace;

const PLAIN: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
const CIPHER: &str = "qwertyuiopasdfghjklzxcvbnm7410852963";

static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug separator pattern is valid"));

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Mint a fresh identifier for an individual of `class_identifier`
///
/// # Example
///
/// ```
/// use alchemy_core::uri;
///
/// let a = uri::generate("http://example.org/", "http://example.org/onto#Dog", "Rex");
/// let b = uri::generate("http://example.org/", "http://example.org/onto#Dog", "Rex");
/// assert!(a.starts_with("http://example.org/Dog/ktb-"));
/// assert_ne!(a, b);
/// ```
pub fn generate(base_uri: &str, class_identifier: &str, seed_label: &str) -> String {
    let mut uri = String::from(base_uri);
    if !(uri.is_empty() || uri.ends_with('/') || uri.ends_with('#') || uri.ends_with(':')) {
        uri.push('/');
    }
    uri.push_str(class_segment(class_identifier));
    uri.push('/');

    let encoded = encode_label(seed_label);
    if !encoded.is_empty() {
        uri.push_str(&encoded);
        uri.push('-');
    }
    uri.push_str(&next_disambiguator().to_string());

    trace!(uri = %uri, "generated identifier");
    uri
}

/// Last non-empty component of an identifier split on `/` or `#`
pub fn class_segment(identifier: &str) -> &str {
    identifier
        .rsplit(|c: char| c == '/' || c == '#')
        .find(|s| !s.is_empty())
        .unwrap_or(identifier)
}

/// Lowercase the label, collapse separators into `-`, then substitute characters
pub fn encode_label(label: &str) -> String {
    let lowered = label.to_lowercase();
    let slug = SLUG_SEPARATORS.replace_all(&lowered, "-");
    slug.trim_matches('-').chars().map(|c| substitute(c, PLAIN, CIPHER)).collect()
}

/// Inverse of [`encode_label`] for the slugged form
pub fn decode_label(encoded: &str) -> String {
    encoded.chars().map(|c| substitute(c, CIPHER, PLAIN)).collect()
}

fn substitute(c: char, from: &str, to: &str) -> char {
    from.chars()
        .position(|f| f == c)
        .and_then(|i| to.chars().nth(i))
        .unwrap_or(c)
}

/// Millisecond clock that hands out strictly increasing values
fn next_disambiguator() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED.load(Ordering::Acquire);
    loop {
        let next = now.max(last + 1);
        match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}
