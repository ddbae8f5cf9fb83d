//! Listing source port.
//!
//! Retrieval, pagination, and per-API price normalization live behind this
//! trait. A source yields records already in the [0, 1] probability domain.

use async_trait::async_trait;

use crate::domain::{ListingRecord, PlatformId};
use crate::error::Result;

/// Fetches the current listings of one platform.
///
/// A failing source must not abort a scan; the scanner treats an error
/// or timeout as an empty listing set for that platform.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Platform this source reads from.
    fn platform(&self) -> &PlatformId;

    /// Fetch every live listing.
    async fn fetch(&self) -> Result<Vec<ListingRecord>>;
}
