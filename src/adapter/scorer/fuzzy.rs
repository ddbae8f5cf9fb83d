//! Fuzzy string-similarity scorer.
//!
//! Compares full normalized questions rather than keyword bags, which
//! catches paraphrases that share few significant terms but read alike.
//! Similarity is normalized Levenshtein distance via `strsim`.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::percent;
use crate::domain::text::normalize;
use crate::domain::MatchMethod;
use crate::port::SimilarityScorer;

/// How the normalized questions are arranged before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMethod {
    /// Edit similarity of the normalized text as-is.
    Ratio,
    /// Edit similarity after sorting tokens; ignores word order.
    #[default]
    TokenSortRatio,
    /// Best edit similarity between the shared tokens and each side's
    /// shared-plus-remaining tokens; scores subsets at 100.
    TokenSetRatio,
}

/// Configuration for the optional fuzzy matching pass.
#[derive(Debug, Clone, Deserialize)]
pub struct FuzzyMatchConfig {
    /// Run the fuzzy pass before the keyword pass.
    #[serde(default)]
    pub enabled: bool,

    /// Minimum score (0-100) for a best candidate to become a match.
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    #[serde(default)]
    pub method: FuzzyMethod,

    /// Questions with fewer normalized tokens than this are not matchable.
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,
}

const fn default_threshold() -> u8 {
    85
}

const fn default_min_tokens() -> usize {
    2
}

impl Default for FuzzyMatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: default_threshold(),
            method: FuzzyMethod::default(),
            min_tokens: default_min_tokens(),
        }
    }
}

/// Normalized question, pre-arranged for every [`FuzzyMethod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    sorted: String,
    tokens: BTreeSet<String>,
}

impl NormalizedText {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let text = normalize(text);
        let mut words: Vec<&str> = text.split_whitespace().collect();
        words.sort_unstable();
        let sorted = words.join(" ");
        let tokens = words.into_iter().map(str::to_owned).collect();
        Self {
            text,
            sorted,
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Scores questions by edit similarity of their normalized text.
#[derive(Debug, Clone)]
pub struct FuzzyScorer {
    method: FuzzyMethod,
    min_tokens: usize,
}

impl FuzzyScorer {
    #[must_use]
    pub const fn new(method: FuzzyMethod, min_tokens: usize) -> Self {
        Self { method, min_tokens }
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::from(&FuzzyMatchConfig::default())
    }
}

impl From<&FuzzyMatchConfig> for FuzzyScorer {
    fn from(config: &FuzzyMatchConfig) -> Self {
        Self::new(config.method, config.min_tokens)
    }
}

impl SimilarityScorer for FuzzyScorer {
    type Features = NormalizedText;

    fn method(&self) -> MatchMethod {
        MatchMethod::Fuzzy
    }

    fn features(&self, text: &str) -> Option<NormalizedText> {
        let normalized = NormalizedText::new(text);
        let count = normalized.token_count();
        (count > 0 && count >= self.min_tokens).then_some(normalized)
    }

    fn compare(&self, a: &NormalizedText, b: &NormalizedText) -> Option<u8> {
        let similarity = match self.method {
            FuzzyMethod::Ratio => ratio(&a.text, &b.text),
            FuzzyMethod::TokenSortRatio => ratio(&a.sorted, &b.sorted),
            FuzzyMethod::TokenSetRatio => token_set_ratio(a, b),
        };
        Some(percent(similarity))
    }
}

fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

fn token_set_ratio(a: &NormalizedText, b: &NormalizedText) -> f64 {
    let shared = join(a.tokens.intersection(&b.tokens));
    let only_a = join(a.tokens.difference(&b.tokens));
    let only_b = join(b.tokens.difference(&a.tokens));

    if shared.is_empty() {
        return ratio(&only_a, &only_b);
    }

    let with_a = concat(&shared, &only_a);
    let with_b = concat(&shared, &only_b);

    ratio(&shared, &with_a)
        .max(ratio(&shared, &with_b))
        .max(ratio(&with_a, &with_b))
}

fn join<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head} {tail}")
    }
}
