//! The engine that answers every transaction query.
//!
//! One engine instance wraps a store handle and serves the five operations
//! the transport layer exposes: the paginated listing, the sale statistics,
//! the price histogram, the category distribution, and the combined monthly
//! fetch.

use time::OffsetDateTime;
use time_tz::{Offset, TimeZone};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{
        BucketCount, CategoryCount, MonthlySummary, SaleStatistics, TransactionFilter,
        TransactionPage, month_date_range, parse_month_name,
    },
};

/// Answers listing and aggregation queries over the transactions in a store.
///
/// The engine is stateless apart from the injected store handle and the
/// timezone that anchors "the current year", so one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct TransactionQueryEngine<S> {
    store: S,
    local_timezone: String,
}

impl<S: TransactionStore> TransactionQueryEngine<S> {
    /// Create an engine that reads from `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". Month names resolve against the current year in
    /// this timezone.
    pub fn new(store: S, local_timezone: &str) -> Self {
        Self {
            store,
            local_timezone: local_timezone.to_owned(),
        }
    }

    /// Builds the filter that scopes a query to `month_name` of the current
    /// year, plus an optional search term.
    ///
    /// Every month-scoped operation goes through this one builder so they
    /// all agree on what the month's date range is.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] when `month_name` is not an English
    /// month name, or [Error::InvalidTimezoneError] when the engine was
    /// configured with a timezone that is not a canonical timezone name.
    pub fn month_filter(
        &self,
        month_name: &str,
        search_term: Option<&str>,
    ) -> Result<TransactionFilter, Error> {
        let month = parse_month_name(month_name)?;
        let range = month_date_range(month, self.reference_year()?);

        Ok(TransactionFilter::new(Some(range), search_term))
    }

    /// Retrieve one page of the transactions matching `filter`, most recent
    /// sale first, along with the page count for the whole match.
    ///
    /// `current_page` echoes the requested page even when it lies past the
    /// last page; the page is then empty. A match of zero transactions spans
    /// zero pages. Pages and page sizes below one are treated as one.
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: u64,
        page_size: u64,
    ) -> Result<TransactionPage, Error> {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let matching = self.store.count(filter)?;
        let transactions = self
            .store
            .get_page(filter, (page - 1).saturating_mul(page_size), page_size)?;

        Ok(TransactionPage {
            transactions,
            total_pages: matching.div_ceil(page_size),
            current_page: page,
        })
    }

    /// Compute the sale totals across the transactions matching `filter`.
    pub fn compute_statistics(&self, filter: &TransactionFilter) -> Result<SaleStatistics, Error> {
        self.store.sale_statistics(filter)
    }

    /// Count the transactions matching `filter` in each price bucket.
    pub fn compute_bucket_histogram(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<BucketCount>, Error> {
        self.store.price_histogram(filter)
    }

    /// Count the transactions matching `filter` per category.
    pub fn compute_category_distribution(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryCount>, Error> {
        self.store.category_distribution(filter)
    }

    /// Fetch the statistics, histogram, and category distribution for
    /// `month_name` of the current year in one operation.
    ///
    /// The three aggregations run concurrently; the first failure aborts the
    /// others. All three see the same filter, so they describe the same set
    /// of transactions to the extent the store serves consistent reads.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] when `month_name` is not an English
    /// month name, or any error the underlying aggregations return.
    pub async fn fetch_combined(&self, month_name: &str) -> Result<MonthlySummary, Error> {
        let filter = self.month_filter(month_name, None)?;

        let (statistics, bar_chart_data, pie_chart_data) = tokio::try_join!(
            async { self.compute_statistics(&filter) },
            async { self.compute_bucket_histogram(&filter) },
            async { self.compute_category_distribution(&filter) },
        )?;

        Ok(MonthlySummary {
            statistics,
            bar_chart_data,
            pie_chart_data,
        })
    }

    fn reference_year(&self) -> Result<i32, Error> {
        let timezone = time_tz::timezones::get_by_name(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))?;
        let now_utc = OffsetDateTime::now_utc();
        let offset = timezone.get_offset_utc(&now_utc).to_utc();

        Ok(now_utc.to_offset(offset).year())
    }
}

#[cfg(test)]
mod transaction_query_engine_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{Date, Month, OffsetDateTime, Time};

    use crate::{
        Error,
        db::initialize,
        stores::{TransactionStore, sqlite::SQLiteTransactionStore},
        transaction::{SaleStatistics, Transaction, TransactionFilter, month_date_range},
    };

    use super::TransactionQueryEngine;

    fn get_test_engine() -> (
        TransactionQueryEngine<SQLiteTransactionStore>,
        SQLiteTransactionStore,
    ) {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory database");
        initialize(&connection).expect("could not initialize database");
        let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)));

        (TransactionQueryEngine::new(store.clone(), "UTC"), store)
    }

    fn day_of_month(month: Month, day: u8) -> OffsetDateTime {
        let year = OffsetDateTime::now_utc().year();
        let date = Date::from_calendar_date(year, month, day).expect("invalid test date");

        OffsetDateTime::new_utc(date, Time::MIDNIGHT)
    }

    fn seed_worked_sample(store: &mut SQLiteTransactionStore) {
        store
            .replace_all(vec![
                Transaction::build("Cheap widget", 50.0, day_of_month(Month::March, 5))
                    .category("A")
                    .sold(true),
                Transaction::build("Mid widget", 250.0, day_of_month(Month::March, 20))
                    .category("B"),
                Transaction::build("April widget", 999.0, day_of_month(Month::April, 1))
                    .category("A")
                    .sold(true),
            ])
            .expect("could not seed store");
    }

    #[test]
    fn month_filter_scopes_to_the_current_year() {
        let (engine, _) = get_test_engine();
        let current_year = OffsetDateTime::now_utc().year();

        let filter = engine
            .month_filter("March", None)
            .expect("could not build filter");

        assert_eq!(
            filter.date_range,
            Some(month_date_range(Month::March, current_year))
        );
        assert_eq!(filter.search, None);
    }

    #[test]
    fn month_filter_rejects_unknown_months() {
        let (engine, _) = get_test_engine();

        let result = engine.month_filter("Febtober", None);

        assert_eq!(result, Err(Error::InvalidMonth("Febtober".to_owned())));
    }

    #[test]
    fn month_filter_rejects_invalid_timezones() {
        let (_, store) = get_test_engine();
        let engine = TransactionQueryEngine::new(store, "Not/AZone");

        let result = engine.month_filter("March", None);

        assert_eq!(
            result,
            Err(Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }

    #[test]
    fn list_transactions_paginates_newest_first() {
        let (engine, mut store) = get_test_engine();
        let builders = (1..=5)
            .map(|day| {
                Transaction::build(
                    &format!("Widget #{day}"),
                    day as f64,
                    day_of_month(Month::March, day as u8),
                )
            })
            .collect();
        store.replace_all(builders).expect("could not seed store");

        let page = engine
            .list_transactions(&TransactionFilter::default(), 2, 2)
            .expect("could not list transactions");

        let titles: Vec<&str> = page
            .transactions
            .iter()
            .map(|transaction| transaction.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Widget #3", "Widget #2"]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn list_transactions_echoes_pages_past_the_end() {
        let (engine, mut store) = get_test_engine();
        store
            .replace_all(vec![Transaction::build(
                "Widget",
                1.0,
                day_of_month(Month::March, 5),
            )])
            .expect("could not seed store");

        let page = engine
            .list_transactions(&TransactionFilter::default(), 99, 10)
            .expect("could not list transactions");

        assert!(page.transactions.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 99);
    }

    #[test]
    fn list_transactions_echoes_the_largest_page_number() {
        let (engine, mut store) = get_test_engine();
        store
            .replace_all(vec![Transaction::build(
                "Widget",
                1.0,
                day_of_month(Month::March, 5),
            )])
            .expect("could not seed store");

        let page = engine
            .list_transactions(&TransactionFilter::default(), u64::MAX, 10)
            .expect("could not list transactions");

        assert!(page.transactions.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, u64::MAX);
    }

    #[test]
    fn list_transactions_with_no_matches_has_zero_pages() {
        let (engine, _) = get_test_engine();

        let page = engine
            .list_transactions(&TransactionFilter::default(), 1, 10)
            .expect("could not list transactions");

        assert!(page.transactions.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn march_aggregations_match_the_worked_sample() {
        let (engine, mut store) = get_test_engine();
        seed_worked_sample(&mut store);
        let filter = engine
            .month_filter("March", None)
            .expect("could not build filter");

        let statistics = engine
            .compute_statistics(&filter)
            .expect("could not compute statistics");
        let histogram = engine
            .compute_bucket_histogram(&filter)
            .expect("could not compute histogram");
        let mut distribution = engine
            .compute_category_distribution(&filter)
            .expect("could not compute distribution");

        assert_eq!(
            statistics,
            SaleStatistics {
                total_sale: 300.0,
                total_sold: 1,
                total_not_sold: 1,
            }
        );

        let histogram: Vec<(&str, u64)> = histogram
            .iter()
            .map(|bucket| (bucket.bucket, bucket.count))
            .collect();
        assert_eq!(histogram, vec![("0-100", 1), ("201-300", 1)]);

        // Both categories hold one transaction, so only the set is fixed.
        distribution.sort_by(|a, b| a.category.cmp(&b.category));
        let distribution: Vec<(&str, u64)> = distribution
            .iter()
            .map(|category| (category.category.as_str(), category.count))
            .collect();
        assert_eq!(distribution, vec![("A", 1), ("B", 1)]);
    }

    #[tokio::test]
    async fn fetch_combined_matches_the_individual_aggregations() {
        let (engine, mut store) = get_test_engine();
        seed_worked_sample(&mut store);
        let filter = engine
            .month_filter("March", None)
            .expect("could not build filter");

        let summary = engine
            .fetch_combined("March")
            .await
            .expect("could not fetch combined data");

        assert_eq!(
            summary.statistics,
            engine.compute_statistics(&filter).expect("statistics")
        );
        assert_eq!(
            summary.bar_chart_data,
            engine.compute_bucket_histogram(&filter).expect("histogram")
        );
        assert_eq!(
            summary.pie_chart_data,
            engine
                .compute_category_distribution(&filter)
                .expect("distribution")
        );
    }

    #[tokio::test]
    async fn fetch_combined_rejects_unknown_months() {
        let (engine, _) = get_test_engine();

        let result = engine.fetch_combined("Smarch").await;

        assert_eq!(result, Err(Error::InvalidMonth("Smarch".to_owned())));
    }
}
