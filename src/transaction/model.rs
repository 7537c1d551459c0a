//! Defines the core data models for sale transactions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Alias for the integer type used for transaction row IDs.
pub type TransactionId = i64;

// ============================================================================
// RECORD
// ============================================================================

/// A retail sale of a single product.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The product title. May be empty.
    pub title: String,
    /// A text description of the product. May be empty.
    pub description: String,
    /// The sale price. Never negative.
    pub price: f64,
    /// The category the product belongs to.
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the sale happened, to millisecond precision.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// URL of the product image, if there is one.
    pub image: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: String::new(),
            sold: false,
            date_of_sale,
            image: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Optional fields default to empty text, an unsold state, and no image.
/// The store assigns the ID when the transaction is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The product title.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// The category the product belongs to.
    pub category: String,
    /// Whether the product has been sold. Defaults to `false`.
    pub sold: bool,
    /// When the sale happened.
    pub date_of_sale: OffsetDateTime,
    /// URL of the product image, if there is one.
    pub image: Option<String>,
}

impl TransactionBuilder {
    /// Set the product description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the product category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the product has been sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the product image URL.
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

// ============================================================================
// READ MODELS
// ============================================================================

/// One page of transactions along with paging bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page, most recent sale first.
    pub transactions: Vec<Transaction>,
    /// How many pages the matching transactions span. Zero when none match.
    pub total_pages: u64,
    /// The page number that was requested.
    pub current_page: u64,
}

/// Aggregate sale totals for a set of matching transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of prices across all matching transactions, sold or not.
    pub total_sale: f64,
    /// How many matching transactions are marked sold.
    pub total_sold: u64,
    /// How many matching transactions are not marked sold.
    pub total_not_sold: u64,
}

/// How many matching transactions fall within one price bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketCount {
    /// The bucket's label, e.g. `"201-300"`.
    pub bucket: &'static str,
    /// How many matching transactions have a price inside the bucket.
    pub count: u64,
}

/// How many matching transactions belong to one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    /// The exact category label.
    pub category: String,
    /// How many matching transactions have the category.
    pub count: u64,
}

/// The three chart data sets for one month, fetched in a single operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Aggregate sale totals for the month.
    pub statistics: SaleStatistics,
    /// The price-bucket histogram for the month.
    pub bar_chart_data: Vec<BucketCount>,
    /// The category distribution for the month.
    pub pie_chart_data: Vec<CategoryCount>,
}
