//! Transaction querying for the sales dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The filter, month range, and price bucket types that scope queries
//! - The query engine that computes listings and aggregations
//! - Handlers for the transaction API endpoints

mod bar_chart_endpoint;
mod buckets;
mod combined_endpoint;
mod engine;
mod filter;
mod list_endpoint;
mod model;
mod pie_chart_endpoint;
mod range;
mod statistics_endpoint;

pub use bar_chart_endpoint::get_bar_chart;
pub use buckets::{PRICE_BUCKETS, PriceBucket};
pub use combined_endpoint::get_combined_data;
pub use engine::TransactionQueryEngine;
pub use filter::{SearchTerm, TransactionFilter};
pub use list_endpoint::get_transactions;
pub use model::{
    BucketCount, CategoryCount, MonthlySummary, SaleStatistics, Transaction, TransactionBuilder,
    TransactionId, TransactionPage,
};
pub use pie_chart_endpoint::get_pie_chart;
pub use range::{DateRange, month_date_range, parse_month_name};
pub use statistics_endpoint::get_statistics;
