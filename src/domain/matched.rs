//! Cross-platform match records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::PairKey;
use super::listing::Listing;

/// Which scoring pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Shared significant keywords.
    Keyword,
    /// String similarity over the normalized question.
    Fuzzy,
}

impl MatchMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claimed correspondence between two listings on different platforms.
///
/// Borrows the listings of the scan it was produced from; a match never
/// outlives its [`ListingSet`](super::listing::ListingSet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// Listing from the first platform of the pass.
    pub a: &'a Listing,
    /// Best candidate found for `a` on the second platform.
    pub b: &'a Listing,
    /// Similarity, 0 to 100.
    pub score: u8,
    pub method: MatchMethod,
}

impl<'a> Match<'a> {
    #[must_use]
    pub fn new(a: &'a Listing, b: &'a Listing, score: u8, method: MatchMethod) -> Self {
        Self {
            a,
            b,
            score,
            method,
        }
    }

    /// Order-independent identity of the matched pair.
    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey::new(self.a.key(), self.b.key())
    }
}
