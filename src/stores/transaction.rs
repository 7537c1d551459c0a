//! Defines the transaction store trait.

use crate::{
    Error,
    transaction::{
        BucketCount, CategoryCount, SaleStatistics, Transaction, TransactionBuilder,
        TransactionFilter,
    },
};

/// Handles the storage, retrieval, and aggregation of sale transactions.
///
/// Every read takes a [TransactionFilter] so the listing and the aggregations
/// always agree on which transactions a month/search combination selects.
pub trait TransactionStore {
    /// Replace the store contents with the given transactions.
    ///
    /// Returns how many transactions were inserted. Used when seeding the
    /// database from the product feed.
    fn replace_all(&mut self, builders: Vec<TransactionBuilder>) -> Result<usize, Error>;

    /// Retrieve the transactions matching `filter`, most recent sale first,
    /// skipping the first `offset` matches and returning at most `limit`.
    ///
    /// Transactions sold at the same instant come back in the order they were
    /// stored.
    fn get_page(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions matching `filter`.
    fn count(&self, filter: &TransactionFilter) -> Result<u64, Error>;

    /// Compute the sale totals across the transactions matching `filter`.
    fn sale_statistics(&self, filter: &TransactionFilter) -> Result<SaleStatistics, Error>;

    /// Count the transactions matching `filter` in each price bucket,
    /// ascending by bucket lower bound. Buckets with no transactions are
    /// omitted.
    fn price_histogram(&self, filter: &TransactionFilter) -> Result<Vec<BucketCount>, Error>;

    /// Count the transactions matching `filter` per category, most numerous
    /// category first.
    fn category_distribution(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryCount>, Error>;
}
