//! Similarity scorer port.
//!
//! The matcher's threshold, tie-break, and de-duplication logic does not
//! depend on how similarity is measured. A scorer only has to turn a
//! question into comparable features and compare two feature sets.
//!
//! # Example
//!
//! ```
//! use oddsbridge::domain::MatchMethod;
//! use oddsbridge::port::SimilarityScorer;
//!
//! struct ExactScorer;
//!
//! impl SimilarityScorer for ExactScorer {
//!     type Features = String;
//!
//!     fn method(&self) -> MatchMethod { MatchMethod::Fuzzy }
//!
//!     fn features(&self, text: &str) -> Option<String> {
//!         let text = text.trim().to_lowercase();
//!         (!text.is_empty()).then_some(text)
//!     }
//!
//!     fn compare(&self, a: &String, b: &String) -> Option<u8> {
//!         Some(if a == b { 100 } else { 0 })
//!     }
//! }
//!
//! assert_eq!(ExactScorer.score("Rain?", "rain?"), Some(100));
//! assert_eq!(ExactScorer.score("", "rain?"), None);
//! ```

use crate::domain::MatchMethod;

/// Scores how likely two questions describe the same proposition.
pub trait SimilarityScorer: Send + Sync {
    /// Pre-computed comparison form of one question.
    type Features;

    /// Method recorded on matches this scorer produces.
    fn method(&self) -> MatchMethod;

    /// Extract features from question text.
    ///
    /// Returns `None` when the text is too degenerate to be evidence; the
    /// listing is then skipped for this scorer.
    fn features(&self, text: &str) -> Option<Self::Features>;

    /// Compare two feature sets, returning a score from 0 to 100.
    ///
    /// Returns `None` when the pair falls below the scorer's own evidence
    /// floor and must not be considered a candidate at all.
    fn compare(&self, a: &Self::Features, b: &Self::Features) -> Option<u8>;

    /// Score two raw questions.
    fn score(&self, a: &str, b: &str) -> Option<u8> {
        let a = self.features(a)?;
        let b = self.features(b)?;
        self.compare(&a, &b)
    }
}
