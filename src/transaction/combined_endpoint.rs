//! Defines the endpoint that fetches all three chart data sets for one month.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error, transaction::MonthlySummary};

/// A route handler for the statistics, price histogram, and category
/// distribution of `month` in the current year, fetched concurrently.
///
/// Responds with the same data the three individual endpoints would return
/// for the month. An unknown month name gets a 400 response.
pub async fn get_combined_data(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<MonthlySummary>, Error> {
    let summary = state
        .engine
        .fetch_combined(&month)
        .await
        .inspect_err(|error| tracing::error!("could not fetch combined data: {error}"))?;

    Ok(Json(summary))
}
