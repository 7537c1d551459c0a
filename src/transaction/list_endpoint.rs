//! Defines the endpoint for listing transactions with search and pagination.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    transaction::{TransactionFilter, TransactionPage},
};

/// The query parameters accepted by the transaction listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// An English month name that narrows the listing to that month of the
    /// current year, e.g. "March".
    month: Option<String>,
    /// A term matched against product titles, descriptions, and prices.
    search: Option<String>,
    /// The 1-based page to return.
    page: Option<u64>,
    /// The number of transactions per page.
    limit: Option<u64>,
}

/// A route handler for listing transactions, most recent sale first.
///
/// Responds with one page of matching transactions plus the page count for
/// the whole match. An unknown month name gets a 400 response.
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionPage>, Error> {
    let search_term = query.search.as_deref();
    let filter = match &query.month {
        Some(month_name) => state.engine.month_filter(month_name, search_term)?,
        None => TransactionFilter::new(None, search_term),
    };
    let page = query.page.unwrap_or(state.pagination_config.default_page);
    let page_size = query
        .limit
        .unwrap_or(state.pagination_config.default_page_size);

    let transaction_page = state
        .engine
        .list_transactions(&filter, page, page_size)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(transaction_page))
}
