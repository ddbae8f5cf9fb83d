//! Domain validation errors for listing records.
//!
//! Collaborators hand over loosely-typed [`ListingRecord`]s. Converting a
//! record into a [`Listing`] checks the listing invariants and reports the
//! first violation as a [`DomainError`]. Rejected records are excluded from
//! matching; they never abort a scan.
//!
//! # Examples
//!
//! ```
//! use oddsbridge::domain::error::DomainError;
//! use oddsbridge::domain::listing::{Listing, ListingRecord};
//!
//! let record = ListingRecord {
//!     platform: "kalshi".into(),
//!     id: "KX-1".into(),
//!     question: Some("   ".into()),
//!     ..Default::default()
//! };
//!
//! assert!(matches!(Listing::try_from(record), Err(DomainError::EmptyQuestion { .. })));
//! ```
//!
//! [`ListingRecord`]: super::listing::ListingRecord
//! [`Listing`]: super::listing::Listing

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when listing invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Every listing needs an identifier to take part in de-duplication.
    #[error("listing on {platform} has an empty id")]
    EmptyListingId {
        /// Platform the record came from.
        platform: String,
    },

    /// The question text is missing or blank.
    #[error("listing {id} has no question text")]
    EmptyQuestion {
        /// Offending listing id.
        id: String,
    },

    /// A price is missing or was not numeric.
    #[error("listing {id} is missing its {side} price")]
    MissingPrice {
        /// Offending listing id.
        id: String,
        /// `"yes"` or `"no"`.
        side: &'static str,
    },

    /// A price lies outside the probability domain.
    #[error("listing {id} has {side} price {price} outside [0, 1]")]
    PriceOutOfRange {
        /// Offending listing id.
        id: String,
        /// `"yes"` or `"no"`.
        side: &'static str,
        /// The rejected price.
        price: Decimal,
    },
}
