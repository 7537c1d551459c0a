//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, seed::DEFAULT_SEED_URL,
    stores::sqlite::SQLiteTransactionStore, transaction::TransactionQueryEngine,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The engine that answers listing and aggregation queries.
    pub engine: TransactionQueryEngine<SQLiteTransactionStore>,

    /// The store the seed endpoint writes into. Shares the database
    /// connection with the engine.
    pub transaction_store: SQLiteTransactionStore,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The URL of the feed the seed endpoint downloads transactions from.
    pub seed_url: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the table for the
    /// transaction records. `local_timezone` should be a valid, canonical
    /// timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let transaction_store = SQLiteTransactionStore::new(Arc::new(Mutex::new(db_connection)));

        Ok(Self {
            engine: TransactionQueryEngine::new(transaction_store.clone(), local_timezone),
            transaction_store,
            pagination_config,
            seed_url: DEFAULT_SEED_URL.to_owned(),
        })
    }
}
