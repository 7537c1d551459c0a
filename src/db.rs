//! Creates and prepares the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

/// Create the transaction table and its index if they do not exist yet.
///
/// Sale dates are stored as integer milliseconds since the Unix epoch.
///
/// # Errors
/// Returns an [Error::SqlError] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale INTEGER NOT NULL,
                image TEXT
                )",
        (),
    )?;

    transaction.execute(
        "CREATE INDEX IF NOT EXISTS transaction_date_of_sale_idx
         ON \"transaction\" (date_of_sale)",
        (),
    )?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_the_schema_idempotently() {
        let connection = Connection::open_in_memory().expect("could not create database");

        initialize(&connection).expect("first initialize failed");
        initialize(&connection).expect("second initialize failed");

        let count: i64 = connection
            .query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| {
                row.get(0)
            })
            .expect("transaction table missing");

        assert_eq!(count, 0);
    }
}
