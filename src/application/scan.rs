//! Scan cycle: fetch, match, evaluate, report.
//!
//! Sources are fetched concurrently, each under its own timeout. A source
//! that fails or stalls contributes an empty platform and is named in the
//! report; the scan itself never fails because of a source.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::evaluator::ArbitrageEvaluator;
use super::matcher::CrossPlatformMatcher;
use crate::domain::{ListingRecord, ListingSet, PlatformId, ScanReport};
use crate::error::{Error, Result};
use crate::port::ListingSource;

/// Configuration for scan cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Per-source fetch timeout in milliseconds.
    #[serde(default = "default_source_timeout_ms")]
    pub source_timeout_ms: u64,
}

const fn default_source_timeout_ms() -> u64 {
    10_000
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_timeout_ms: default_source_timeout_ms(),
        }
    }
}

/// Runs the matcher and evaluator over listings from a set of sources.
pub struct Scanner {
    matcher: CrossPlatformMatcher,
    evaluator: ArbitrageEvaluator,
    config: ScanConfig,
    sources: Vec<Arc<dyn ListingSource>>,
}

impl Scanner {
    #[must_use]
    pub fn new(
        matcher: CrossPlatformMatcher,
        evaluator: ArbitrageEvaluator,
        config: ScanConfig,
    ) -> Self {
        Self {
            matcher,
            evaluator,
            config,
            sources: Vec::new(),
        }
    }

    /// Add a source to fetch on every scan.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ListingSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn add_source(&mut self, source: Arc<dyn ListingSource>) {
        self.sources.push(source);
    }

    /// Platforms of the registered sources, in registration order.
    pub fn platforms(&self) -> impl Iterator<Item = &PlatformId> {
        self.sources.iter().map(|s| s.platform())
    }

    /// Fetch every source and scan the combined listings.
    pub async fn scan(&self) -> ScanReport {
        let millis = self.config.source_timeout_ms;
        let fetches = self
            .sources
            .iter()
            .map(|source| fetch_with_timeout(source.as_ref(), millis));
        let results = join_all(fetches).await;

        let mut set = ListingSet::new();
        let mut failed = Vec::new();

        for (source, result) in self.sources.iter().zip(results) {
            let platform = source.platform();
            set.register_platform(platform.clone());

            match result {
                Ok(records) => {
                    let fetched = records.len();
                    let rejected = set.extend_records(stamp_platform(platform, records));
                    debug!(%platform, fetched, rejected, "Fetched listings");
                }
                Err(e) => {
                    warn!(%platform, error = %e, "Listing source unavailable");
                    failed.push(platform.to_string());
                }
            }
        }

        self.report(&set, failed)
    }

    /// Scan already-fetched records, one batch per platform.
    ///
    /// Every batch's platform appears in the report, even when empty.
    pub fn scan_records<I>(&self, batches: I) -> ScanReport
    where
        I: IntoIterator<Item = (PlatformId, Vec<ListingRecord>)>,
    {
        let mut set = ListingSet::new();
        for (platform, records) in batches {
            set.register_platform(platform.clone());
            set.extend_records(stamp_platform(&platform, records));
        }
        self.report(&set, Vec::new())
    }

    /// Scan a prepared listing set.
    pub fn scan_set(&self, set: &ListingSet) -> ScanReport {
        self.report(set, Vec::new())
    }

    /// Scan every `interval` and send each report to `tx`.
    ///
    /// The first scan runs immediately. The task ends once the receiver
    /// is dropped.
    pub fn spawn_periodic(
        self: Arc<Self>,
        interval: Duration,
        tx: mpsc::Sender<ScanReport>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    () = tx.closed() => {
                        debug!("Scan report receiver dropped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let report = self.scan().await;
                        if tx.send(report).await.is_err() {
                            debug!("Scan report receiver dropped");
                            break;
                        }
                    }
                }
            }
        })
    }

    fn report(&self, set: &ListingSet, failed_sources: Vec<String>) -> ScanReport {
        let ledger = self.matcher.run(set);
        let opportunities = self.evaluator.evaluate(ledger.matches());

        let report = ScanReport {
            scan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            platforms: set.counts(),
            total_listings: set.len(),
            rejected_listings: set.rejected(),
            unmatchable_listings: self.matcher.unmatchable(set),
            failed_sources,
            match_count: ledger.len(),
            opportunities,
        };

        info!(
            scan_id = %report.scan_id,
            listings = report.total_listings,
            rejected = report.rejected_listings,
            matches = report.match_count,
            opportunities = report.opportunities.len(),
            failed = report.failed_sources.len(),
            "Scan complete"
        );
        report
    }
}

async fn fetch_with_timeout(source: &dyn ListingSource, millis: u64) -> Result<Vec<ListingRecord>> {
    match tokio::time::timeout(Duration::from_millis(millis), source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            platform: source.platform().to_string(),
            millis,
        }),
    }
}

/// Records with a blank platform take the source's.
fn stamp_platform(platform: &PlatformId, mut records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    for record in &mut records {
        if record.platform.trim().is_empty() {
            record.platform = platform.to_string();
        }
    }
    records
}
