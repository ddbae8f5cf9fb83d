//! Monetary types for price and spread representation.

use rust_decimal::Decimal;

/// Price of one share paying $1 on resolution, as a probability in [0, 1].
pub type Price = Decimal;

/// Guaranteed profit per $1 payout of a fully-hedged basket.
pub type Spread = Decimal;

/// Whether a price lies inside the probability domain.
#[must_use]
pub fn is_probability(price: Price) -> bool {
    price >= Decimal::ZERO && price <= Decimal::ONE
}
