//! Oddsbridge - Cross-platform prediction market matching and arbitrage detection.
//!
//! Listings of binary-outcome contracts arrive from several independent
//! platforms. The crate pairs listings that describe the same real-world
//! proposition and checks whether buying complementary sides on the two
//! platforms costs less than the guaranteed $1 payout.
//!
//! # Architecture
//!
//! - **`domain`** - Listings, matches, opportunities, and the pure text
//!   functions (normalization, keyword extraction)
//! - **`port`** - Trait seams: [`port::SimilarityScorer`] and
//!   [`port::ListingSource`]
//! - **`adapter`** - Keyword-overlap and fuzzy scorers, in-memory and
//!   JSON-file listing sources
//! - **`application`** - [`application::CrossPlatformMatcher`],
//!   [`application::ArbitrageEvaluator`], and the [`application::Scanner`]
//!   that drives a full cycle
//! - **`infrastructure`** - TOML configuration and logging
//!
//! # Example
//!
//! ```
//! use oddsbridge::application::{ArbitrageEvaluator, CrossPlatformMatcher};
//! use oddsbridge::domain::{Listing, ListingSet};
//! use rust_decimal_macros::dec;
//!
//! let a = Listing::try_new("X", "a", "Will the bill pass by June?", dec!(0.40), dec!(0.55), "");
//! let b = Listing::try_new("Y", "b", "Bill passes before June", dec!(0.50), dec!(0.42), "");
//! let set: ListingSet = vec![a.unwrap(), b.unwrap()].into_iter().collect();
//!
//! let ledger = CrossPlatformMatcher::default().run(&set);
//! let arbs = ArbitrageEvaluator::default().evaluate(ledger.matches());
//!
//! assert_eq!(arbs[0].spread, dec!(0.18));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
