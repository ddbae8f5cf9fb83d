//! Keyword-overlap scorer.
//!
//! Scores a pair by the number of shared significant keywords, divided by
//! a configurable denominator. The default divides by the smaller keyword
//! set so that a terse phrasing of a longer question still scores high.

use serde::Deserialize;

use super::percent;
use crate::domain::text::{keywords, KeywordSet};
use crate::domain::MatchMethod;
use crate::port::SimilarityScorer;

/// How the shared-keyword count is normalized into a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapDenominator {
    /// Smaller of the two set sizes. Rewards near-subset phrasings.
    #[default]
    Min,
    /// Larger of the two set sizes.
    Max,
    /// Size of the union (Jaccard index).
    Union,
    /// Harmonic mean of the two set sizes (Dice coefficient).
    HarmonicMean,
}

impl OverlapDenominator {
    fn of(self, a: usize, b: usize, overlap: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let (a, b, overlap) = (a as f64, b as f64, overlap as f64);
        match self {
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Union => a + b - overlap,
            Self::HarmonicMean => 2.0 * a * b / (a + b),
        }
    }
}

/// Configuration for the keyword matching pass.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordMatchConfig {
    /// Minimum score (0-100) for a best candidate to become a match.
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Listings with fewer keywords than this are not matchable.
    #[serde(default = "default_min_keywords")]
    pub min_keywords: usize,

    /// Candidates sharing fewer keywords than this are rejected outright.
    #[serde(default = "default_min_overlap")]
    pub min_overlap: usize,

    #[serde(default)]
    pub denominator: OverlapDenominator,
}

const fn default_threshold() -> u8 {
    50
}

const fn default_min_keywords() -> usize {
    2
}

const fn default_min_overlap() -> usize {
    2
}

impl Default for KeywordMatchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_keywords: default_min_keywords(),
            min_overlap: default_min_overlap(),
            denominator: OverlapDenominator::default(),
        }
    }
}

/// Scores questions by shared significant keywords.
#[derive(Debug, Clone)]
pub struct KeywordOverlapScorer {
    min_keywords: usize,
    min_overlap: usize,
    denominator: OverlapDenominator,
}

impl KeywordOverlapScorer {
    #[must_use]
    pub const fn new(
        min_keywords: usize,
        min_overlap: usize,
        denominator: OverlapDenominator,
    ) -> Self {
        Self {
            min_keywords,
            min_overlap,
            denominator,
        }
    }
}

impl Default for KeywordOverlapScorer {
    fn default() -> Self {
        Self::from(&KeywordMatchConfig::default())
    }
}

impl From<&KeywordMatchConfig> for KeywordOverlapScorer {
    fn from(config: &KeywordMatchConfig) -> Self {
        Self::new(config.min_keywords, config.min_overlap, config.denominator)
    }
}

impl SimilarityScorer for KeywordOverlapScorer {
    type Features = KeywordSet;

    fn method(&self) -> MatchMethod {
        MatchMethod::Keyword
    }

    fn features(&self, text: &str) -> Option<KeywordSet> {
        let set = keywords(text);
        (!set.is_empty() && set.len() >= self.min_keywords).then_some(set)
    }

    fn compare(&self, a: &KeywordSet, b: &KeywordSet) -> Option<u8> {
        let overlap = a.intersection(b).count();
        if overlap == 0 || overlap < self.min_overlap {
            return None;
        }

        let denominator = self.denominator.of(a.len(), b.len(), overlap);
        if denominator <= 0.0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let ratio = overlap as f64 / denominator;
        Some(percent(ratio))
    }
}
