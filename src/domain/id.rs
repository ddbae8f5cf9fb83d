//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source platform identifier - newtype for type safety.
///
/// Ordered so that platform pairs are always visited in the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    /// Create a new `PlatformId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the platform ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlatformId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PlatformId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Listing identifier, unique within its platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Create a new `ListingId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the listing ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Globally unique identity of a listing: its platform plus its id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingKey {
    pub platform: PlatformId,
    pub id: ListingId,
}

impl ListingKey {
    #[must_use]
    pub fn new(platform: PlatformId, id: ListingId) -> Self {
        Self { platform, id }
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.id)
    }
}

/// Order-independent key for a pair of listings.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey(ListingKey, ListingKey);

impl PairKey {
    #[must_use]
    pub fn new(a: ListingKey, b: ListingKey) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller key of the pair.
    #[must_use]
    pub fn low(&self) -> &ListingKey {
        &self.0
    }

    /// The larger key of the pair.
    #[must_use]
    pub fn high(&self) -> &ListingKey {
        &self.1
    }
}
