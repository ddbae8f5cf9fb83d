//! Integration tests for full scan cycles over listing sources.

mod support;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::sync::mpsc;

use oddsbridge::adapter::source::{JsonFileSource, MemorySource};
use oddsbridge::application::{ArbitrageEvaluator, CrossPlatformMatcher, ScanConfig, Scanner};
use oddsbridge::domain::{ListingRecord, PlatformId, ScanReport};

use support::listing::make_record;

fn scanner(timeout_ms: u64) -> Scanner {
    Scanner::new(
        CrossPlatformMatcher::default(),
        ArbitrageEvaluator::default(),
        ScanConfig {
            source_timeout_ms: timeout_ms,
        },
    )
}

fn bill_records() -> (Vec<ListingRecord>, Vec<ListingRecord>) {
    (
        vec![make_record(
            "X",
            "x-bill",
            "Will the bill pass by June?",
            dec!(0.40),
            dec!(0.55),
        )],
        vec![make_record(
            "Y",
            "y-bill",
            "Bill passes before June",
            dec!(0.50),
            dec!(0.42),
        )],
    )
}

#[tokio::test]
async fn scan_finds_opportunity_across_sources() {
    let (x, y) = bill_records();
    let scanner = scanner(1_000)
        .with_source(Arc::new(MemorySource::new("X", x)))
        .with_source(Arc::new(MemorySource::new("Y", y)));

    let report = scanner.scan().await;

    assert_eq!(report.total_listings, 2);
    assert_eq!(report.match_count, 1);
    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(report.opportunities[0].spread, dec!(0.18));
    assert!(report.failed_sources.is_empty());
}

#[tokio::test]
async fn slow_source_times_out_without_failing_scan() {
    let (x, y) = bill_records();
    let scanner = scanner(50)
        .with_source(Arc::new(MemorySource::new("X", x)))
        .with_source(Arc::new(
            MemorySource::new("Y", y).with_delay(Duration::from_secs(5)),
        ));

    let report = scanner.scan().await;

    assert_eq!(report.failed_sources, vec!["Y".to_string()]);
    assert_eq!(report.platforms.get("Y"), Some(&0));
    assert_eq!(report.platforms.get("X"), Some(&1));
    assert_eq!(report.match_count, 0);
}

#[tokio::test]
async fn malformed_records_are_counted_not_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "y-bill", "question": "Bill passes before June", "yes_price": "0.50",
              "no_price": 0.42}},
            {{"id": "y-bad", "question": "Senate budget vote", "yes_price": "n/a",
              "no_price": 0.42}},
            {{"id": "y-blank", "question": "   ", "yes_price": 0.5, "no_price": 0.5}}
        ]"#
    )
    .unwrap();

    let (x, _) = bill_records();
    let scanner = scanner(1_000)
        .with_source(Arc::new(MemorySource::new("X", x)))
        .with_source(Arc::new(JsonFileSource::new("Y", file.path())));

    let report = scanner.scan().await;

    assert_eq!(report.platforms.get("Y"), Some(&1));
    assert_eq!(report.rejected_listings, 2);
    assert_eq!(report.opportunities.len(), 1);
}

#[tokio::test]
async fn record_without_id_is_rejected_and_sibling_still_matches() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"question": "Bill passes before June", "yes_price": 0.5, "no_price": 0.3}},
            {{"id": "y-bill", "question": "Bill passes before June", "yes_price": 0.50,
              "no_price": 0.42}}
        ]"#
    )
    .unwrap();

    let (x, _) = bill_records();
    let scanner = scanner(1_000)
        .with_source(Arc::new(MemorySource::new("X", x)))
        .with_source(Arc::new(JsonFileSource::new("Y", file.path())));

    let report = scanner.scan().await;

    assert!(report.failed_sources.is_empty());
    assert_eq!(report.platforms.get("Y"), Some(&1));
    assert_eq!(report.rejected_listings, 1);
    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(report.opportunities[0].side_b.listing_id, "y-bill");
    assert_eq!(report.opportunities[0].spread, dec!(0.18));
}

#[tokio::test]
async fn missing_file_is_a_failed_source() {
    let scanner = scanner(1_000).with_source(Arc::new(JsonFileSource::new(
        "Y",
        "/nonexistent/listings.json",
    )));

    let report = scanner.scan().await;

    assert_eq!(report.failed_sources, vec!["Y".to_string()]);
    assert_eq!(report.total_listings, 0);
}

#[test]
fn report_serializes_to_json() {
    let (x, y) = bill_records();
    let report = scanner(1_000).scan_records(vec![
        (PlatformId::new("X"), x),
        (PlatformId::new("Y"), y),
    ]);

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["match_count"], 1);
    assert_eq!(value["opportunities"][0]["hedge"], "yes_a_no_b");
    assert_eq!(value["opportunities"][0]["method"], "keyword");

    let back: ScanReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[tokio::test]
async fn periodic_scan_stops_when_receiver_drops() {
    let (x, y) = bill_records();
    let scanner = Arc::new(
        scanner(1_000)
            .with_source(Arc::new(MemorySource::new("X", x)))
            .with_source(Arc::new(MemorySource::new("Y", y))),
    );
    let (tx, mut rx) = mpsc::channel(1);

    let handle = scanner.spawn_periodic(Duration::from_millis(10), tx);

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_ne!(first.scan_id, second.scan_id);
    assert_eq!(second.opportunities.len(), 1);

    drop(rx);
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}
