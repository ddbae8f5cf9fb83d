//! Cross-platform arbitrage evaluator.
//!
//! For a matched pair (A, B) there are exactly two fully-hedged baskets:
//! YES on A with NO on B, and NO on A with YES on B. Each pays $1 whatever
//! the outcome, so its spread is `1 - cost`. The evaluator keeps the better
//! basket per match and drops matches where neither basket is profitable.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::arb::price_of;
use crate::domain::{Arb, ArbSide, Hedge, Listing, Match, Spread};

/// Configuration for opportunity evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorConfig {
    /// Spread a basket must strictly exceed to be reported.
    #[serde(default = "default_min_spread")]
    pub min_spread: Decimal,

    /// Maximum characters of the question kept on the opportunity.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

const fn default_min_spread() -> Decimal {
    Decimal::ZERO
}

const fn default_excerpt_chars() -> usize {
    100
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            min_spread: default_min_spread(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

/// Turns matches into ranked arbitrage opportunities.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageEvaluator {
    config: EvaluatorConfig,
}

impl ArbitrageEvaluator {
    #[must_use]
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate every match, best spread first.
    ///
    /// The sort is stable, so equal spreads keep match order.
    pub fn evaluate(&self, matches: &[Match<'_>]) -> Vec<Arb> {
        let mut arbs: Vec<Arb> = matches
            .iter()
            .filter_map(|m| self.evaluate_match(m))
            .collect();

        arbs.sort_by(|x, y| y.spread.cmp(&x.spread));

        debug!(
            matches = matches.len(),
            opportunities = arbs.len(),
            "Evaluation complete"
        );
        arbs
    }

    /// Evaluate a single match.
    ///
    /// Returns `None` unless the better basket clears `min_spread`. On an
    /// exact tie YES-on-A wins.
    pub fn evaluate_match(&self, m: &Match<'_>) -> Option<Arb> {
        let (hedge, cost) = best_hedge(m.a, m.b);
        let spread: Spread = Decimal::ONE - cost;

        if spread <= self.config.min_spread {
            return None;
        }

        Some(Arb {
            question: excerpt(m.a.question(), self.config.excerpt_chars),
            score: m.score,
            method: m.method,
            spread,
            cost,
            hedge,
            strategy: describe(hedge, m.a, m.b),
            side_a: ArbSide::from(m.a),
            side_b: ArbSide::from(m.b),
        })
    }
}

/// The cheaper of the two baskets and its cost.
fn best_hedge(a: &Listing, b: &Listing) -> (Hedge, Decimal) {
    let first = Hedge::YesANoB.cost(a, b);
    let second = Hedge::NoAYesB.cost(a, b);

    if second < first {
        (Hedge::NoAYesB, second)
    } else {
        (Hedge::YesANoB, first)
    }
}

fn describe(hedge: Hedge, a: &Listing, b: &Listing) -> String {
    let (side_a, side_b) = hedge.sides();
    format!(
        "Buy {side_a} on {} @ {} + Buy {side_b} on {} @ {}",
        a.platform(),
        price_of(a, side_a),
        b.platform(),
        price_of(b, side_b),
    )
}

/// First `max_chars` characters of `text`, cut on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
