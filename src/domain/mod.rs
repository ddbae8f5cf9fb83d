//! Platform-agnostic domain types and pure text functions.

pub mod arb;
pub mod error;
pub mod id;
pub mod listing;
pub mod matched;
pub mod money;
pub mod report;
pub mod text;

pub use arb::{Arb, ArbSide, Hedge, Side};
pub use error::DomainError;
pub use id::{ListingId, ListingKey, PairKey, PlatformId};
pub use listing::{Listing, ListingRecord, ListingSet};
pub use matched::{Match, MatchMethod};
pub use money::{Price, Spread};
pub use report::ScanReport;
