//! Cross-platform listing matcher.
//!
//! For every unordered pair of platforms in a [`ListingSet`], each listing
//! on the first platform is paired with its single best-scoring candidate
//! on the second, provided the score clears the pass threshold. Every pass
//! writes into one [`MatchLedger`], which keeps the result conflict-free:
//!
//! - a pair of listings is recorded at most once, whichever pass finds it
//! - a listing appears in at most one match across every platform pair
//!   and every pass
//!
//! Ties keep the earliest candidate: a later candidate replaces the current
//! best only with a strictly greater score.
//!
//! # Passes
//!
//! 1. Fuzzy (optional) - edit similarity of the normalized question
//! 2. Keyword - shared significant terms
//!
//! Listings too degenerate for a scorer are skipped by that pass, never
//! rejected with an error.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::adapter::scorer::{
    FuzzyMatchConfig, FuzzyScorer, KeywordMatchConfig, KeywordOverlapScorer,
};
use crate::domain::{Listing, ListingKey, ListingSet, Match, PairKey, PlatformId};
use crate::port::SimilarityScorer;

/// Configuration for both matching passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub keyword: KeywordMatchConfig,

    #[serde(default)]
    pub fuzzy: FuzzyMatchConfig,
}

/// De-duplication accumulator threaded through every matching pass.
///
/// Holds the accepted matches plus the bookkeeping needed to refuse a
/// second claim on the same pair or on an already matched listing.
#[derive(Debug, Default)]
pub struct MatchLedger<'a> {
    pairs: HashSet<PairKey>,
    claimed: HashSet<ListingKey>,
    matches: Vec<Match<'a>>,
}

impl<'a> MatchLedger<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `listing` is already part of an accepted match.
    #[must_use]
    pub fn is_claimed(&self, listing: &Listing) -> bool {
        self.claimed.contains(&listing.key())
    }

    /// Whether this pair of listings has been matched already.
    #[must_use]
    pub fn contains(&self, key: &PairKey) -> bool {
        self.pairs.contains(key)
    }

    /// Record a match unless it conflicts with one already accepted.
    ///
    /// Returns `true` if the match was recorded.
    pub fn accept(&mut self, candidate: Match<'a>) -> bool {
        let (a, b) = (candidate.a, candidate.b);
        let key = candidate.key();

        if a.platform() == b.platform()
            || self.pairs.contains(&key)
            || self.is_claimed(a)
            || self.is_claimed(b)
        {
            return false;
        }

        self.pairs.insert(key);
        self.claimed.insert(a.key());
        self.claimed.insert(b.key());
        self.matches.push(candidate);
        true
    }

    /// Accepted matches in acceptance order.
    pub fn matches(&self) -> &[Match<'a>] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_matches(self) -> Vec<Match<'a>> {
        self.matches
    }
}

/// Match the listings of one platform against those of another.
///
/// `right` features are extracted once up front. Each unclaimed `left`
/// listing with usable features takes its best unclaimed candidate from
/// `right` (ties keep the earliest), and the pair is offered to the ledger
/// if the score reaches `threshold`. Returns the number of matches the
/// ledger accepted.
pub fn match_platform_pair<'a, S>(
    scorer: &S,
    threshold: u8,
    left: &'a [Listing],
    right: &'a [Listing],
    ledger: &mut MatchLedger<'a>,
) -> usize
where
    S: SimilarityScorer,
{
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let candidates: Vec<(&'a Listing, S::Features)> = right
        .iter()
        .filter_map(|b| scorer.features(b.question()).map(|f| (b, f)))
        .collect();

    if candidates.is_empty() {
        return 0;
    }

    let mut accepted = 0;

    for a in left {
        if ledger.is_claimed(a) {
            continue;
        }
        let Some(features) = scorer.features(a.question()) else {
            continue;
        };

        let mut best: Option<(&'a Listing, u8)> = None;
        for (b, candidate) in &candidates {
            if ledger.is_claimed(b) {
                continue;
            }
            let Some(score) = scorer.compare(&features, candidate) else {
                continue;
            };
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((*b, score));
            }
        }

        let Some((b, score)) = best else {
            continue;
        };
        if score < threshold {
            continue;
        }

        if ledger.accept(Match::new(a, b, score, scorer.method())) {
            debug!(
                method = %scorer.method(),
                score,
                a = %a.key(),
                b = %b.key(),
                "Matched listings"
            );
            accepted += 1;
        }
    }

    accepted
}

/// Runs the configured passes over every platform pair.
#[derive(Debug, Clone)]
pub struct CrossPlatformMatcher {
    config: MatcherConfig,
    keyword: KeywordOverlapScorer,
    fuzzy: Option<FuzzyScorer>,
}

impl CrossPlatformMatcher {
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        let keyword = KeywordOverlapScorer::from(&config.keyword);
        let fuzzy = config
            .fuzzy
            .enabled
            .then(|| FuzzyScorer::from(&config.fuzzy));
        Self {
            config,
            keyword,
            fuzzy,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Match every pair of platforms in `set`.
    pub fn run<'a>(&self, set: &'a ListingSet) -> MatchLedger<'a> {
        let mut ledger = MatchLedger::new();

        if let Some(fuzzy) = &self.fuzzy {
            self.run_pass(fuzzy, self.config.fuzzy.threshold, set, &mut ledger);
        }
        self.run_pass(&self.keyword, self.config.keyword.threshold, set, &mut ledger);

        ledger
    }

    /// Run one scorer over every platform pair, in platform order.
    pub fn run_pass<'a, S>(
        &self,
        scorer: &S,
        threshold: u8,
        set: &'a ListingSet,
        ledger: &mut MatchLedger<'a>,
    ) where
        S: SimilarityScorer,
    {
        let platforms: Vec<&PlatformId> = set.platforms().collect();
        let mut accepted = 0;

        for (i, left) in platforms.iter().enumerate() {
            for right in &platforms[i + 1..] {
                accepted += match_platform_pair(
                    scorer,
                    threshold,
                    set.listings(left),
                    set.listings(right),
                    ledger,
                );
            }
        }

        debug!(
            method = %scorer.method(),
            platforms = platforms.len(),
            accepted,
            total = ledger.len(),
            "Matching pass complete"
        );
    }

    /// Count listings that no enabled pass can match.
    #[must_use]
    pub fn unmatchable(&self, set: &ListingSet) -> usize {
        set.iter()
            .filter(|listing| {
                let question = listing.question();
                self.keyword.features(question).is_none()
                    && self
                        .fuzzy
                        .as_ref()
                        .map_or(true, |f| f.features(question).is_none())
            })
            .count()
    }
}

impl Default for CrossPlatformMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::scorer::FuzzyMethod;
    use crate::domain::MatchMethod;
    use rust_decimal_macros::dec;

    fn listing(platform: &str, id: &str, question: &str) -> Listing {
        Listing::try_new(platform, id, question, dec!(0.5), dec!(0.5), "").unwrap()
    }

    fn ids(ledger: &MatchLedger<'_>) -> Vec<(String, String)> {
        ledger
            .matches()
            .iter()
            .map(|m| (m.a.id().to_string(), m.b.id().to_string()))
            .collect()
    }

    #[test]
    fn pairs_best_candidate() {
        let left = vec![listing("x", "x1", "Will the bill pass by June?")];
        let right = vec![
            listing("y", "y1", "Senate bill vote in March"),
            listing("y", "y2", "Bill passes before June"),
        ];
        let mut ledger = MatchLedger::new();

        let accepted = match_platform_pair(
            &KeywordOverlapScorer::default(),
            50,
            &left,
            &right,
            &mut ledger,
        );

        assert_eq!(accepted, 1);
        assert_eq!(ids(&ledger), vec![("x1".into(), "y2".into())]);
        assert_eq!(ledger.matches()[0].score, 100);
    }

    #[test]
    fn ties_keep_earliest_candidate() {
        let left = vec![listing("x", "x1", "Tesla stock split announcement")];
        let right = vec![
            listing("y", "y1", "Tesla stock split"),
            listing("y", "y2", "Tesla stock split"),
        ];
        let mut ledger = MatchLedger::new();

        match_platform_pair(
            &KeywordOverlapScorer::default(),
            50,
            &left,
            &right,
            &mut ledger,
        );

        assert_eq!(ids(&ledger), vec![("x1".into(), "y1".into())]);
    }

    #[test]
    fn below_threshold_is_not_matched() {
        let left = vec![listing("x", "x1", "Tesla stock split Musk Austin")];
        let right = vec![listing("y", "y1", "Tesla stock dividend Ford Detroit")];
        let mut ledger = MatchLedger::new();

        // 2 shared of min(5, 5) = 40
        let accepted = match_platform_pair(
            &KeywordOverlapScorer::default(),
            50,
            &left,
            &right,
            &mut ledger,
        );

        assert_eq!(accepted, 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn claimed_candidate_is_not_reused() {
        let left = vec![
            listing("x", "x1", "Tesla stock split"),
            listing("x", "x2", "Tesla stock split announced"),
        ];
        let right = vec![listing("y", "y1", "Tesla stock split")];
        let mut ledger = MatchLedger::new();

        match_platform_pair(
            &KeywordOverlapScorer::default(),
            50,
            &left,
            &right,
            &mut ledger,
        );

        assert_eq!(ids(&ledger), vec![("x1".into(), "y1".into())]);
    }

    #[test]
    fn degenerate_listings_are_skipped() {
        let left = vec![listing("x", "x1", "Will it?"), listing("x", "x2", "2024")];
        let right = vec![listing("y", "y1", "Will it happen?")];
        let mut ledger = MatchLedger::new();

        let accepted = match_platform_pair(
            &KeywordOverlapScorer::default(),
            0,
            &left,
            &right,
            &mut ledger,
        );

        assert_eq!(accepted, 0);
    }

    #[test]
    fn ledger_refuses_duplicate_pair() {
        let x = listing("x", "x1", "Q one?");
        let y = listing("y", "y1", "Q two?");
        let mut ledger = MatchLedger::new();

        assert!(ledger.accept(Match::new(&x, &y, 90, MatchMethod::Fuzzy)));
        assert!(!ledger.accept(Match::new(&y, &x, 95, MatchMethod::Keyword)));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains(&PairKey::new(x.key(), y.key())));
    }

    #[test]
    fn ledger_refuses_same_platform() {
        let x1 = listing("x", "x1", "Q one?");
        let x2 = listing("x", "x2", "Q two?");
        let mut ledger = MatchLedger::new();

        assert!(!ledger.accept(Match::new(&x1, &x2, 100, MatchMethod::Keyword)));
    }

    #[test]
    fn listing_is_matched_once_across_platforms() {
        let set: ListingSet = vec![
            listing("x", "x1", "Tesla stock split"),
            listing("y", "y1", "Tesla stock split"),
            listing("z", "z1", "Tesla stock split"),
        ]
        .into_iter()
        .collect();

        let ledger = CrossPlatformMatcher::default().run(&set);

        assert_eq!(ids(&ledger), vec![("x1".into(), "y1".into())]);
    }

    #[test]
    fn ledger_refuses_claimed_listing_on_another_platform() {
        let x = listing("x", "x1", "Q one?");
        let y = listing("y", "y1", "Q two?");
        let z = listing("z", "z1", "Q three?");
        let mut ledger = MatchLedger::new();

        assert!(ledger.accept(Match::new(&x, &y, 90, MatchMethod::Keyword)));
        assert!(!ledger.accept(Match::new(&x, &z, 95, MatchMethod::Keyword)));
        assert!(!ledger.accept(Match::new(&z, &y, 95, MatchMethod::Fuzzy)));
        assert!(ledger.is_claimed(&x));
        assert!(!ledger.is_claimed(&z));
    }

    #[test]
    fn fuzzy_pass_claims_before_keyword_pass() {
        let set: ListingSet = vec![
            listing("x", "x1", "Chiefs beat Ravens"),
            listing("y", "y1", "Ravens beat Chiefs"),
        ]
        .into_iter()
        .collect();

        let config = MatcherConfig {
            fuzzy: FuzzyMatchConfig {
                enabled: true,
                method: FuzzyMethod::TokenSortRatio,
                ..Default::default()
            },
            ..Default::default()
        };
        let ledger = CrossPlatformMatcher::new(config).run(&set);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.matches()[0].method, MatchMethod::Fuzzy);
    }

    #[test]
    fn counts_unmatchable_listings() {
        let set: ListingSet = vec![
            listing("x", "x1", "Will it?"),
            listing("x", "x2", "Tesla stock split"),
            listing("y", "y1", "Rain?"),
        ]
        .into_iter()
        .collect();

        assert_eq!(CrossPlatformMatcher::default().unmatchable(&set), 2);
    }
}
