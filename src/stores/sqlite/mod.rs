//! Contains the SQLite backed implementations of the store traits.

mod transaction;

pub use transaction::SQLiteTransactionStore;
