//! Salescope is a web service that answers queries about retail sale
//! transactions.
//!
//! This library provides the JSON REST API that backs a sales dashboard:
//! a paginated transaction listing with search, monthly sale statistics, a
//! price histogram, a category distribution, and an endpoint that seeds the
//! database from an upstream product feed.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod pagination;
mod routing;
mod seed;
mod stores;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, seed_store};
pub use stores::{TransactionStore, sqlite::SQLiteTransactionStore};
pub use transaction::{
    BucketCount, CategoryCount, DateRange, MonthlySummary, PRICE_BUCKETS, PriceBucket,
    SaleStatistics, SearchTerm, Transaction, TransactionBuilder, TransactionFilter, TransactionId,
    TransactionPage, TransactionQueryEngine,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client asked for a month by a name that is not an English month
    /// name.
    #[error("\"{0}\" is not a valid month name")]
    InvalidMonth(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The seed feed could not be downloaded.
    #[error("could not fetch the seed feed: {0}")]
    SeedFetchError(String),

    /// The seed feed's body was not a JSON array of product records.
    #[error("could not parse the seed feed: {0}")]
    InvalidSeedData(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidMonth(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::SeedFetchError(_) | Error::InvalidSeedData(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
