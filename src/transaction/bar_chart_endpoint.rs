//! Defines the endpoint for the price histogram of one month.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error, transaction::BucketCount};

/// A route handler for the price histogram of `month` in the current year.
///
/// Responds with the occupied price buckets in ascending price order. A
/// month with no transactions gets an empty list, an unknown month name gets
/// a 400 response.
pub async fn get_bar_chart(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<BucketCount>>, Error> {
    let filter = state.engine.month_filter(&month, None)?;
    let histogram = state
        .engine
        .compute_bucket_histogram(&filter)
        .inspect_err(|error| tracing::error!("could not compute price histogram: {error}"))?;

    Ok(Json(histogram))
}
