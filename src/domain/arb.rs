//! Arbitrage opportunity types.
//!
//! An [`Arb`] is derived from exactly one [`Match`](super::matched::Match):
//! buying YES on one platform and NO on the other pays exactly $1 whatever
//! the outcome, so any basket costing less than $1 locks in the difference.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::listing::Listing;
use super::matched::MatchMethod;
use super::money::{Price, Spread};

/// Contract side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("YES"),
            Self::No => f.write_str("NO"),
        }
    }
}

/// One of the two ways to fully cover a binary outcome across a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hedge {
    /// Buy YES on side A and NO on side B.
    YesANoB,
    /// Buy NO on side A and YES on side B.
    NoAYesB,
}

impl Hedge {
    /// Sides bought on A and on B, in that order.
    #[must_use]
    pub const fn sides(&self) -> (Side, Side) {
        match self {
            Self::YesANoB => (Side::Yes, Side::No),
            Self::NoAYesB => (Side::No, Side::Yes),
        }
    }

    /// Cost of the basket for the given pair of listings.
    #[must_use]
    pub fn cost(&self, a: &Listing, b: &Listing) -> Price {
        let (side_a, side_b) = self.sides();
        price_of(a, side_a) + price_of(b, side_b)
    }
}

/// Current price of one side of a listing.
#[must_use]
pub fn price_of(listing: &Listing, side: Side) -> Price {
    match side {
        Side::Yes => listing.yes_price(),
        Side::No => listing.no_price(),
    }
}

/// One platform's half of an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbSide {
    pub platform: String,
    pub listing_id: String,
    pub url: String,
    pub yes_price: Price,
    pub no_price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl From<&Listing> for ArbSide {
    fn from(listing: &Listing) -> Self {
        Self {
            platform: listing.platform().to_string(),
            listing_id: listing.id().to_string(),
            url: listing.url().to_string(),
            yes_price: listing.yes_price(),
            no_price: listing.no_price(),
            event: listing.event().map(str::to_owned),
        }
    }
}

/// A fully-hedged basket across two matched listings that costs less
/// than its guaranteed $1 payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arb {
    /// Leading part of side A's question.
    pub question: String,
    /// Similarity score of the underlying match.
    pub score: u8,
    pub method: MatchMethod,
    /// `1 - cost` of the chosen hedge.
    pub spread: Spread,
    /// Total price of the chosen basket.
    pub cost: Price,
    pub hedge: Hedge,
    /// Human-readable legs, e.g. `Buy YES on kalshi @ 0.40 + Buy NO on polymarket @ 0.42`.
    pub strategy: String,
    pub side_a: ArbSide,
    pub side_b: ArbSide,
}
