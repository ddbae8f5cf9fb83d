//! Listing types: the uniform record every source platform produces.
//!
//! - [`ListingRecord`] - Wire shape handed over by collaborators. Loosely
//!   typed: question and prices may be missing or malformed.
//! - [`Listing`] - Validated, immutable listing used by the matcher.
//! - [`ListingSet`] - Listings of one scan grouped by platform.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::DomainError;
use super::id::{ListingId, ListingKey, PlatformId};
use super::money::{is_probability, Price};

/// A listing as delivered by a retrieval collaborator.
///
/// Prices that are absent, `null`, or not numeric deserialize to `None`
/// rather than failing the whole batch; validation happens in
/// [`Listing::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub platform: String,
    pub id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub yes_price: Option<Price>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub no_price: Option<Price>,
    #[serde(default)]
    pub url: String,
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => parse_price(&n.to_string()),
        serde_json::Value::String(s) => parse_price(s.trim()),
        _ => None,
    }))
}

fn parse_price(raw: &str) -> Option<Price> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// One binary-outcome contract on one platform.
///
/// `yes_price` and `no_price` are independent estimates and need not sum
/// to one; that gap is what arbitrage feeds on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    platform: PlatformId,
    id: ListingId,
    question: String,
    event: Option<String>,
    yes_price: Price,
    no_price: Price,
    url: String,
}

impl Listing {
    /// Create a listing, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the id or question is blank or a
    /// price lies outside [0, 1].
    pub fn try_new(
        platform: impl Into<PlatformId>,
        id: impl Into<ListingId>,
        question: impl Into<String>,
        yes_price: Price,
        no_price: Price,
        url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let platform = platform.into();
        let id = id.into();
        let question = question.into();

        if id.as_str().trim().is_empty() {
            return Err(DomainError::EmptyListingId {
                platform: platform.to_string(),
            });
        }
        if question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion { id: id.to_string() });
        }
        check_price(&id, "yes", yes_price)?;
        check_price(&id, "no", no_price)?;

        Ok(Self {
            platform,
            id,
            question,
            event: None,
            yes_price,
            no_price,
            url: url.into(),
        })
    }

    /// Attach an event grouping label.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    pub fn id(&self) -> &ListingId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn yes_price(&self) -> Price {
        self.yes_price
    }

    pub fn no_price(&self) -> Price {
        self.no_price
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Identity used for de-duplication.
    #[must_use]
    pub fn key(&self) -> ListingKey {
        ListingKey::new(self.platform.clone(), self.id.clone())
    }
}

fn check_price(id: &ListingId, side: &'static str, price: Price) -> Result<(), DomainError> {
    if is_probability(price) {
        Ok(())
    } else {
        Err(DomainError::PriceOutOfRange {
            id: id.to_string(),
            side,
            price,
        })
    }
}

impl TryFrom<ListingRecord> for Listing {
    type Error = DomainError;

    fn try_from(record: ListingRecord) -> Result<Self, Self::Error> {
        let question = record.question.unwrap_or_default();
        let yes_price = record.yes_price.ok_or_else(|| DomainError::MissingPrice {
            id: record.id.clone(),
            side: "yes",
        })?;
        let no_price = record.no_price.ok_or_else(|| DomainError::MissingPrice {
            id: record.id.clone(),
            side: "no",
        })?;

        let listing = Self::try_new(
            record.platform,
            record.id,
            question,
            yes_price,
            no_price,
            record.url,
        )?;

        Ok(match record.event {
            Some(event) if !event.trim().is_empty() => listing.with_event(event),
            _ => listing,
        })
    }
}

/// Listings of one scan, grouped by platform.
///
/// Platforms iterate in lexicographic order; listings keep their insertion
/// order within a platform. A platform may be registered with no listings
/// so that an unavailable source still reports a zero count.
#[derive(Debug, Clone, Default)]
pub struct ListingSet {
    by_platform: BTreeMap<PlatformId, Vec<Listing>>,
    rejected: usize,
}

impl ListingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw records, dropping the ones that fail validation.
    pub fn from_records(records: impl IntoIterator<Item = ListingRecord>) -> Self {
        let mut set = Self::new();
        set.extend_records(records);
        set
    }

    /// Validate and insert raw records. Returns how many were rejected.
    pub fn extend_records(&mut self, records: impl IntoIterator<Item = ListingRecord>) -> usize {
        let mut rejected = 0;
        for record in records {
            match Listing::try_from(record) {
                Ok(listing) => self.insert(listing),
                Err(e) => {
                    tracing::debug!(reason = %e, "Rejected malformed listing");
                    rejected += 1;
                }
            }
        }
        self.rejected += rejected;
        rejected
    }

    /// Make sure a platform appears in the set, even with no listings.
    pub fn register_platform(&mut self, platform: PlatformId) {
        self.by_platform.entry(platform).or_default();
    }

    pub fn insert(&mut self, listing: Listing) {
        self.by_platform
            .entry(listing.platform().clone())
            .or_default()
            .push(listing);
    }

    /// Platforms in iteration order.
    pub fn platforms(&self) -> impl Iterator<Item = &PlatformId> {
        self.by_platform.keys()
    }

    /// Listings for one platform (empty if unknown).
    pub fn listings(&self, platform: &PlatformId) -> &[Listing] {
        self.by_platform.get(platform).map_or(&[], Vec::as_slice)
    }

    /// Every listing, platform by platform.
    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.by_platform.values().flatten()
    }

    /// Listing count per platform.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.by_platform
            .iter()
            .map(|(platform, listings)| (platform.to_string(), listings.len()))
            .collect()
    }

    /// Total number of valid listings.
    pub fn len(&self) -> usize {
        self.by_platform.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records rejected as malformed.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl FromIterator<Listing> for ListingSet {
    fn from_iter<I: IntoIterator<Item = Listing>>(iter: I) -> Self {
        let mut set = Self::new();
        for listing in iter {
            set.insert(listing);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(platform: &str, id: &str, question: &str) -> ListingRecord {
        ListingRecord {
            platform: platform.into(),
            id: id.into(),
            question: Some(question.into()),
            event: None,
            yes_price: Some(dec!(0.40)),
            no_price: Some(dec!(0.55)),
            url: format!("https://{platform}.example/{id}"),
        }
    }

    #[test]
    fn try_new_accepts_valid_listing() {
        let listing =
            Listing::try_new("kalshi", "K1", "Will it rain?", dec!(0.3), dec!(0.6), "u").unwrap();
        assert_eq!(listing.platform().as_str(), "kalshi");
        assert_eq!(listing.yes_price(), dec!(0.3));
        assert!(listing.event().is_none());
    }

    #[test]
    fn try_new_rejects_blank_question() {
        let result = Listing::try_new("kalshi", "K1", "  \t", dec!(0.3), dec!(0.6), "u");
        assert!(matches!(result, Err(DomainError::EmptyQuestion { .. })));
    }

    #[test]
    fn try_new_rejects_blank_id() {
        let result = Listing::try_new("kalshi", "", "Q?", dec!(0.3), dec!(0.6), "u");
        assert!(matches!(result, Err(DomainError::EmptyListingId { .. })));
    }

    #[test]
    fn try_new_rejects_price_above_one() {
        let result = Listing::try_new("kalshi", "K1", "Q?", dec!(42), dec!(0.6), "u");
        assert!(matches!(
            result,
            Err(DomainError::PriceOutOfRange { side: "yes", .. })
        ));
    }

    #[test]
    fn record_without_no_price_is_rejected() {
        let mut r = record("kalshi", "K1", "Will it rain?");
        r.no_price = None;
        assert!(matches!(
            Listing::try_from(r),
            Err(DomainError::MissingPrice { side: "no", .. })
        ));
    }

    #[test]
    fn record_keeps_event_label() {
        let mut r = record("kalshi", "K1", "Will it rain?");
        r.event = Some("Weather".into());
        let listing = Listing::try_from(r).unwrap();
        assert_eq!(listing.event(), Some("Weather"));
    }

    #[test]
    fn record_deserializes_numeric_and_string_prices() {
        let json = r#"{"platform":"p","id":"1","question":"Q?","yes_price":0.4,"no_price":"0.55"}"#;
        let r: ListingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.yes_price, Some(dec!(0.4)));
        assert_eq!(r.no_price, Some(dec!(0.55)));
        assert_eq!(r.url, "");
    }

    #[test]
    fn non_numeric_price_becomes_missing() {
        let json = r#"{"platform":"p","id":"1","question":"Q?","yes_price":"n/a","no_price":null}"#;
        let r: ListingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.yes_price, None);
        assert_eq!(r.no_price, None);
    }

    #[test]
    fn set_counts_and_rejections() {
        let mut bad = record("kalshi", "K2", "Q?");
        bad.yes_price = None;
        let set = ListingSet::from_records(vec![
            record("kalshi", "K1", "Will it rain?"),
            bad,
            record("polymarket", "P1", "Rain tomorrow?"),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.rejected(), 1);
        assert_eq!(set.counts().get("kalshi"), Some(&1));
        assert_eq!(set.counts().get("polymarket"), Some(&1));
    }

    #[test]
    fn registered_platform_reports_zero() {
        let mut set = ListingSet::new();
        set.register_platform(PlatformId::from("manifold"));
        assert_eq!(set.counts().get("manifold"), Some(&0));
        assert!(set.listings(&PlatformId::from("manifold")).is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn platforms_iterate_in_order() {
        let set = ListingSet::from_records(vec![
            record("polymarket", "P1", "Q one?"),
            record("kalshi", "K1", "Q two?"),
        ]);
        let platforms: Vec<_> = set.platforms().map(PlatformId::as_str).collect();
        assert_eq!(platforms, vec!["kalshi", "polymarket"]);
    }
}
