//! Defines the endpoint for the category distribution of one month.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error, transaction::CategoryCount};

/// A route handler for the category distribution of `month` in the current year.
///
/// Responds with each category and its transaction count, most common first.
/// A month with no transactions gets an empty list, an unknown month name
/// gets a 400 response.
pub async fn get_pie_chart(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let filter = state.engine.month_filter(&month, None)?;
    let distribution = state
        .engine
        .compute_category_distribution(&filter)
        .inspect_err(|error| tracing::error!("could not compute category distribution: {error}"))?;

    Ok(Json(distribution))
}
