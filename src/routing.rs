//! Application router configuration for the transactions API.

use axum::{Router, response::Html, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    seed::seed_database,
    transaction::{
        get_bar_chart, get_combined_data, get_pie_chart, get_statistics, get_transactions,
    },
};

/// Return a router with all the app's routes.
///
/// The API is meant to be called from dashboard frontends on other origins,
/// so every route allows cross-origin requests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::SEED, get(seed_database))
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .route(endpoints::COMBINED_DATA, get(get_combined_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' greets the caller.
async fn get_index() -> Html<&'static str> {
    Html("Welcome to the Transactions API")
}
