//! Similarity scorers.

mod fuzzy;
mod keyword;

pub use fuzzy::{FuzzyMatchConfig, FuzzyMethod, FuzzyScorer, NormalizedText};
pub use keyword::{KeywordMatchConfig, KeywordOverlapScorer, OverlapDenominator};

/// Scale a ratio in [0, 1] to a whole percentage, rounding half away from zero.
pub(crate) fn percent(ratio: f64) -> u8 {
    // Clamped to 0..=100 first, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
    pct
}
