use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use oddsbridge::domain::{Listing, ListingRecord, ListingSet};

pub fn make_listing(
    platform: &str,
    id: &str,
    question: &str,
    yes: Decimal,
    no: Decimal,
) -> Listing {
    Listing::try_new(
        platform,
        id,
        question,
        yes,
        no,
        format!("https://{platform}.example/{id}"),
    )
    .unwrap()
}

/// Listing priced at even odds, for tests that only exercise matching.
pub fn even_listing(platform: &str, id: &str, question: &str) -> Listing {
    make_listing(platform, id, question, dec!(0.5), dec!(0.5))
}

pub fn make_record(
    platform: &str,
    id: &str,
    question: &str,
    yes: Decimal,
    no: Decimal,
) -> ListingRecord {
    ListingRecord {
        platform: platform.into(),
        id: id.into(),
        question: Some(question.into()),
        yes_price: Some(yes),
        no_price: Some(no),
        url: format!("https://{platform}.example/{id}"),
        ..Default::default()
    }
}

pub fn listing_set(listings: Vec<Listing>) -> ListingSet {
    listings.into_iter().collect()
}

/// The two listings of the "bill" scenario: YES on X plus NO on Y costs 0.82.
pub fn bill_pair() -> (Listing, Listing) {
    (
        make_listing(
            "X",
            "x-bill",
            "Will the bill pass by June?",
            dec!(0.40),
            dec!(0.55),
        ),
        make_listing(
            "Y",
            "y-bill",
            "Bill passes before June",
            dec!(0.50),
            dec!(0.42),
        ),
    )
}
