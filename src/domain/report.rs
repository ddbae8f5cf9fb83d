//! Scan result handed to the presentation/API layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::arb::Arb;

/// Outcome of one scan cycle.
///
/// Every rejection path in the core is silent filtering, so the counts
/// here are the only place those paths become observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Valid listing count per platform.
    pub platforms: BTreeMap<String, usize>,
    pub total_listings: usize,
    /// Records dropped as malformed.
    pub rejected_listings: usize,
    /// Valid listings whose question carried too few keywords to match.
    pub unmatchable_listings: usize,
    /// Platforms whose source failed or timed out this cycle.
    pub failed_sources: Vec<String>,
    pub match_count: usize,
    /// Opportunities, best spread first.
    pub opportunities: Vec<Arb>,
}

impl ScanReport {
    /// Render the report as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render the report as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
