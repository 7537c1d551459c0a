//! Defines the endpoint for the sale statistics of one month.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error, transaction::SaleStatistics};

/// A route handler for the sale totals of `month` in the current year.
///
/// Responds with the total sale amount and the sold and unsold counts. A
/// month with no transactions gets all-zero totals, an unknown month name
/// gets a 400 response.
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<SaleStatistics>, Error> {
    let filter = state.engine.month_filter(&month, None)?;
    let statistics = state
        .engine
        .compute_statistics(&filter)
        .inspect_err(|error| tracing::error!("could not compute sale statistics: {error}"))?;

    Ok(Json(statistics))
}
