//! Defines the endpoint that re-seeds the database from the upstream feed.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{AppState, Error, seed::seed_store};

/// A route handler that replaces the database contents with the configured
/// seed feed.
///
/// Responds with how many transactions were inserted. When the feed cannot
/// be fetched or parsed the database is left untouched and the response is a
/// 502.
pub async fn seed_database(State(state): State<AppState>) -> Result<Json<Value>, Error> {
    let mut store = state.transaction_store;
    let count = seed_store(&mut store, &state.seed_url)
        .await
        .inspect_err(|error| tracing::error!("could not seed the database: {error}"))?;

    Ok(Json(json!({
        "message": format!("Database seeded successfully with {count} transactions.")
    })))
}
