//! Seeding the database from the upstream product transaction feed.
//!
//! The feed is a JSON array of product records without usable sale dates.
//! Seeding replaces the whole table: each record gets a sale date spread over
//! the twelve months leading up to now so that every month has data to chart.

mod endpoint;

pub use endpoint::seed_database;

use rand::Rng;
use serde::Deserialize;
use time::{Date, Month, OffsetDateTime};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder},
};

/// The feed the database is seeded from when no other URL is configured.
pub const DEFAULT_SEED_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// One product record from the seed feed.
///
/// Every field may be missing or empty. Conversion into a transaction fills
/// the gaps with the placeholder values the dashboard expects.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    sold: Option<bool>,
    #[serde(default)]
    image: Option<String>,
}

impl SeedRecord {
    /// Convert the record into a transaction builder dated `date_of_sale`.
    fn into_builder(self, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        let title = non_empty(self.title).unwrap_or_else(|| "No Title".to_owned());
        let description =
            non_empty(self.description).unwrap_or_else(|| "No Description".to_owned());
        let category = non_empty(self.category).unwrap_or_else(|| "Uncategorized".to_owned());

        Transaction::build(&title, self.price.unwrap_or(0.0), date_of_sale)
            .description(&description)
            .category(&category)
            .sold(self.sold.unwrap_or(false))
            .image(non_empty(self.image))
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.is_empty())
}

/// Download and parse the seed feed at `url`.
///
/// # Errors
/// Returns [Error::SeedFetchError] when the request fails or the server
/// responds with an error status, or [Error::InvalidSeedData] when the body
/// is not a JSON array of product records.
pub async fn fetch_seed_data(url: &str) -> Result<Vec<SeedRecord>, Error> {
    let response = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::SeedFetchError(error.to_string()))?;

    response
        .json()
        .await
        .map_err(|error| Error::InvalidSeedData(error.to_string()))
}

/// Date the records so they spread across the twelve months leading up to `now`.
///
/// Record `i` lands `i % 12` months before `now`, on a random day between
/// the 1st and the 28th, keeping `now`'s time of day. Capping the day at 28
/// keeps the date valid in every month.
pub fn assign_sale_dates<R: Rng>(
    records: Vec<SeedRecord>,
    now: OffsetDateTime,
    rng: &mut R,
) -> Vec<TransactionBuilder> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let day_of_month = rng.random_range(1..=28);
            let date_of_sale = months_before(now, (index % 12) as u8, day_of_month);

            record.into_builder(date_of_sale)
        })
        .collect()
}

fn months_before(now: OffsetDateTime, months: u8, day_of_month: u8) -> OffsetDateTime {
    let months_since_year_zero = now.year() * 12 + now.month() as i32 - 1 - months as i32;
    let year = months_since_year_zero.div_euclid(12);
    let month = Month::try_from((months_since_year_zero.rem_euclid(12) + 1) as u8)
        .expect("a remainder of twelve is a valid month number");
    let date = Date::from_calendar_date(year, month, day_of_month)
        .expect("every month has at least 28 days");

    now.replace_date(date)
}

/// Replace the store's contents with freshly dated records from the feed at `url`.
///
/// Returns how many transactions were inserted.
///
/// # Errors
/// Returns an error when the feed cannot be fetched or parsed, or when the
/// store cannot be written to.
pub async fn seed_store<S: TransactionStore>(store: &mut S, url: &str) -> Result<usize, Error> {
    let records = fetch_seed_data(url).await?;
    let builders = assign_sale_dates(records, OffsetDateTime::now_utc(), &mut rand::rng());

    store.replace_all(builders)
}

#[cfg(test)]
mod seed_tests {
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;
    use time::{Month, macros::datetime};

    use super::{SeedRecord, assign_sale_dates};

    fn feed_record(value: serde_json::Value) -> SeedRecord {
        serde_json::from_value(value).expect("could not parse seed record")
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let record = feed_record(json!({}));

        let builder = record.into_builder(datetime!(2025-03-05 12:00 UTC));

        assert_eq!(builder.title, "No Title");
        assert_eq!(builder.description, "No Description");
        assert_eq!(builder.price, 0.0);
        assert_eq!(builder.category, "Uncategorized");
        assert!(!builder.sold);
        assert_eq!(builder.image, None);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let record = feed_record(json!({
            "title": "",
            "description": "",
            "category": "",
            "image": "",
        }));

        let builder = record.into_builder(datetime!(2025-03-05 12:00 UTC));

        assert_eq!(builder.title, "No Title");
        assert_eq!(builder.description, "No Description");
        assert_eq!(builder.category, "Uncategorized");
        assert_eq!(builder.image, None);
    }

    #[test]
    fn present_fields_are_kept() {
        let record = feed_record(json!({
            "title": "Laptop",
            "description": "A fast laptop",
            "price": 799.99,
            "category": "electronics",
            "sold": true,
            "image": "https://example.com/laptop.png",
        }));

        let builder = record.into_builder(datetime!(2025-03-05 12:00 UTC));

        assert_eq!(builder.title, "Laptop");
        assert_eq!(builder.description, "A fast laptop");
        assert_eq!(builder.price, 799.99);
        assert_eq!(builder.category, "electronics");
        assert!(builder.sold);
        assert_eq!(
            builder.image,
            Some("https://example.com/laptop.png".to_owned())
        );
    }

    #[test]
    fn dates_spread_over_the_twelve_months_before_now() {
        let records = (0..24)
            .map(|index| feed_record(json!({ "title": format!("Product {index}") })))
            .collect();
        let now = datetime!(2025-08-21 10:30 UTC);
        let mut rng = StdRng::seed_from_u64(42);

        let builders = assign_sale_dates(records, now, &mut rng);

        let expect_month = |index: usize, year: i32, month: Month| {
            let date = builders[index].date_of_sale;
            assert_eq!(
                (date.year(), date.month()),
                (year, month),
                "record {index} landed on {date}"
            );
        };

        expect_month(0, 2025, Month::August);
        expect_month(1, 2025, Month::July);
        expect_month(7, 2025, Month::January);
        expect_month(8, 2024, Month::December);
        expect_month(11, 2024, Month::September);
        // The thirteenth record wraps around to the newest month again.
        expect_month(12, 2025, Month::August);
        expect_month(23, 2024, Month::September);

        for builder in &builders {
            let date = builder.date_of_sale;
            assert!(
                (1..=28).contains(&date.day()),
                "day {} is outside 1..=28",
                date.day()
            );
            assert_eq!(date.time(), now.time());
        }
    }

    #[test]
    fn january_rolls_back_into_the_previous_year() {
        let records = vec![
            feed_record(json!({ "title": "This year" })),
            feed_record(json!({ "title": "Last year" })),
        ];
        let now = datetime!(2025-01-15 0:00 UTC);
        let mut rng = StdRng::seed_from_u64(42);

        let builders = assign_sale_dates(records, now, &mut rng);

        assert_eq!(builders[0].date_of_sale.year(), 2025);
        assert_eq!(builders[0].date_of_sale.month(), Month::January);
        assert_eq!(builders[1].date_of_sale.year(), 2024);
        assert_eq!(builders[1].date_of_sale.month(), Month::December);
    }
}
