//! Significant-term extraction.
//!
//! Short tokens and generic or temporal words dominate overlap counts
//! without saying anything about the topic ("will", "year", "2025"), so
//! they are dropped here.

use std::collections::BTreeSet;

use super::normalize::normalize;

/// Keywords are strictly longer than this many characters.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Bag of significant terms for one question.
pub type KeywordSet = BTreeSet<String>;

/// Generic and temporal words, in stemmed form.
const GENERIC_WORDS: &[&str] = &[
    "will", "what", "when", "where", "which", "whom", "whose", "before", "after", "until",
    "during", "within", "next", "last", "year", "month", "week", "today", "tomorrow", "yesterday",
    "time", "date", "least", "most", "more", "less", "about", "into", "onto", "upon", "there",
    "their", "these", "those", "they", "them", "your", "other", "such", "some", "many", "much",
    "being", "could", "should", "shall", "must", "might", "happen", "market", "question",
    "resolve",
];

/// Extract the keyword set of a question.
///
/// Normalizes the text, reduces plural suffixes with [`stem`], and keeps
/// tokens longer than [`MIN_KEYWORD_LEN`] characters that are neither
/// generic words nor pure digits. Degenerate input yields an empty set.
///
/// ```
/// use oddsbridge::domain::text::keywords;
///
/// let kw = keywords("Bill passes before June 2025");
/// assert!(kw.contains("bill") && kw.contains("pass") && kw.contains("june"));
/// assert_eq!(kw.len(), 3);
/// ```
#[must_use]
pub fn keywords(text: &str) -> KeywordSet {
    normalize(text)
        .split_whitespace()
        .map(stem)
        .filter(|token| is_significant(token))
        .map(|token| token.into_owned())
        .collect()
}

fn is_significant(token: &str) -> bool {
    token.chars().count() > MIN_KEYWORD_LEN
        && !token.chars().all(char::is_numeric)
        && !GENERIC_WORDS.contains(&token)
}

/// Reduce a plural suffix so singular and plural forms compare equal.
///
/// `sses -> ss`, `ies -> y`, and a trailing `s` is dropped unless the
/// word ends in `ss`, `us`, or `is`.
///
/// ```
/// use oddsbridge::domain::text::stem;
///
/// assert_eq!(stem("passes"), "pass");
/// assert_eq!(stem("parties"), "party");
/// assert_eq!(stem("bills"), "bill");
/// assert_eq!(stem("congress"), "congress");
/// ```
#[must_use]
pub fn stem(token: &str) -> std::borrow::Cow<'_, str> {
    use std::borrow::Cow;

    if let Some(base) = token.strip_suffix("sses") {
        return Cow::Owned(format!("{base}ss"));
    }
    if let Some(base) = token.strip_suffix("ies") {
        if !base.is_empty() {
            return Cow::Owned(format!("{base}y"));
        }
    }
    if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        return Cow::Borrowed(token);
    }
    match token.strip_suffix('s') {
        Some(base) if !base.is_empty() => Cow::Borrowed(base),
        _ => Cow::Borrowed(token),
    }
}
