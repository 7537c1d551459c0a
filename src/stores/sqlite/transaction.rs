//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::OffsetDateTime;

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{
        BucketCount, CategoryCount, PRICE_BUCKETS, SaleStatistics, Transaction,
        TransactionBuilder, TransactionFilter,
    },
};

const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image";

/// Stores sale transactions in a SQLite database.
///
/// Sale dates are stored as integer milliseconds since the Unix epoch, which
/// keeps the inclusive date-range comparisons exact.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Replace the store contents with the given transactions.
    ///
    /// The delete and the inserts happen in a single SQL transaction, so a
    /// failed seed leaves the previous contents in place.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the database lock cannot be
    /// acquired, or [Error::SqlError] if there is an unexpected SQL error.
    fn replace_all(&mut self, builders: Vec<TransactionBuilder>) -> Result<usize, Error> {
        let connection = self.lock_connection()?;

        let tx = connection.unchecked_transaction()?;
        tx.execute("DELETE FROM \"transaction\"", ())?;

        let mut statement = tx.prepare(
            "INSERT INTO \"transaction\" (title, description, price, category, sold, date_of_sale, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        let mut inserted = 0;
        for builder in builders {
            statement.execute((
                builder.title,
                builder.description,
                builder.price,
                builder.category,
                builder.sold,
                unix_milliseconds(builder.date_of_sale),
                builder.image,
            ))?;
            inserted += 1;
        }

        drop(statement);
        tx.commit()?;

        Ok(inserted)
    }

    /// Retrieve one page of the transactions matching `filter`, most recent
    /// sale first. Ties on the sale date come back in insertion order.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the database lock cannot be
    /// acquired, or [Error::SqlError] if there is an unexpected SQL error.
    fn get_page(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        // SQLite parses integer literals past i64::MAX as REAL, which LIMIT
        // and OFFSET reject with a datatype mismatch.
        let offset = offset.min(i64::MAX as u64);
        let limit = limit.min(i64::MAX as u64);

        let (where_clause, parameters) = filter_clause(filter);
        let query_string = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause}
             ORDER BY date_of_sale DESC, id ASC
             LIMIT {limit} OFFSET {offset}"
        );

        self.lock_connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Count the transactions matching `filter`.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the database lock cannot be
    /// acquired, or [Error::SqlError] if there is an unexpected SQL error.
    fn count(&self, filter: &TransactionFilter) -> Result<u64, Error> {
        let (where_clause, parameters) = filter_clause(filter);
        let query_string = format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}");

        let count = self
            .lock_connection()?
            .prepare(&query_string)?
            .query_row(params_from_iter(parameters.iter()), |row| row.get(0))?;

        Ok(count)
    }

    /// Compute the sale totals across the transactions matching `filter` in
    /// a single pass. An empty match yields the zero statistics.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the database lock cannot be
    /// acquired, or [Error::SqlError] if there is an unexpected SQL error.
    fn sale_statistics(&self, filter: &TransactionFilter) -> Result<SaleStatistics, Error> {
        let (where_clause, parameters) = filter_clause(filter);
        let query_string = format!(
            "SELECT COALESCE(SUM(price), 0),
                    COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
             FROM \"transaction\" {where_clause}"
        );

        let statistics = self.lock_connection()?.prepare(&query_string)?.query_row(
            params_from_iter(parameters.iter()),
            |row| {
                Ok(SaleStatistics {
                    total_sale: row.get(0)?,
                    total_sold: row.get(1)?,
                    total_not_sold: row.get(2)?,
                })
            },
        )?;

        Ok(statistics)
    }

    /// Count the transactions matching `filter` in each price bucket. The
    /// bucket boundaries come from [PRICE_BUCKETS], so a price exactly on a
    /// boundary lands in the bucket starting there.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the database lock cannot be
    /// acquired, or [Error::SqlError] if there is an unexpected SQL error.
    fn price_histogram(&self, filter: &TransactionFilter) -> Result<Vec<BucketCount>, Error> {
        let (where_clause, parameters) = filter_clause(filter);
        let query_string = format!(
            "SELECT {} AS bucket_index, COUNT(id) FROM \"transaction\" {where_clause}
             GROUP BY bucket_index
             ORDER BY bucket_index ASC",
            bucket_case_expression()
        );

        self.lock_connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                let index: usize = row.get(0)?;
                let bucket = PRICE_BUCKETS
                    .get(index)
                    .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, index as i64))?;

                Ok(BucketCount {
                    bucket: bucket.label,
                    count: row.get(1)?,
                })
            })?
            .map(|maybe_bucket| maybe_bucket.map_err(Error::SqlError))
            .collect()
    }

    /// Count the transactions matching `filter` per category, most numerous
    /// category first. Categories are compared exactly, including case.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the database lock cannot be
    /// acquired, or [Error::SqlError] if there is an unexpected SQL error.
    fn category_distribution(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryCount>, Error> {
        let (where_clause, parameters) = filter_clause(filter);
        let query_string = format!(
            "SELECT category, COUNT(id) AS transaction_count FROM \"transaction\" {where_clause}
             GROUP BY category
             ORDER BY transaction_count DESC"
        );

        self.lock_connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }
}

/// Translates `filter` into a WHERE clause and its parameters.
///
/// Every query goes through this one translation so the date-range and search
/// semantics cannot drift apart between the listing and the aggregations.
fn filter_clause(filter: &TransactionFilter) -> (String, Vec<Value>) {
    let mut where_clause_parts = vec![];
    let mut query_parameters = vec![];

    if let Some(date_range) = filter.date_range {
        where_clause_parts.push(format!(
            "date_of_sale BETWEEN ?{} AND ?{}",
            query_parameters.len() + 1,
            query_parameters.len() + 2,
        ));
        query_parameters.push(Value::Integer(unix_milliseconds(date_range.start)));
        query_parameters.push(Value::Integer(unix_milliseconds(date_range.end)));
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search.text());
        let mut search_parts = vec![
            format!("title LIKE ?{} ESCAPE '\\'", query_parameters.len() + 1),
            format!(
                "description LIKE ?{} ESCAPE '\\'",
                query_parameters.len() + 2
            ),
        ];
        query_parameters.push(Value::Text(pattern.clone()));
        query_parameters.push(Value::Text(pattern));

        if let Some(price) = search.price() {
            search_parts.push(format!("price = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Real(price));
        }

        where_clause_parts.push(format!("({})", search_parts.join(" OR ")));
    }

    let where_clause = if where_clause_parts.is_empty() {
        String::new()
    } else {
        String::from("WHERE ") + &where_clause_parts.join(" AND ")
    };

    (where_clause, query_parameters)
}

/// Builds the CASE expression that maps a price onto its index in
/// [PRICE_BUCKETS].
fn bucket_case_expression() -> String {
    let mut case_parts = vec![String::from("CASE")];

    for (index, bucket) in PRICE_BUCKETS.iter().enumerate() {
        match bucket.upper {
            Some(upper) => case_parts.push(format!("WHEN price < {upper} THEN {index}")),
            None => case_parts.push(format!("ELSE {index}")),
        }
    }

    case_parts.push(String::from("END"));
    case_parts.join(" ")
}

/// Escapes LIKE wildcards in `term` and wraps it in `%` so the term matches
/// as a literal substring anywhere in the column.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');

    for character in term.chars() {
        if matches!(character, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(character);
    }

    pattern.push('%');
    pattern
}

fn unix_milliseconds(instant: OffsetDateTime) -> i64 {
    (instant.unix_timestamp_nanos() / 1_000_000) as i64
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let date_milliseconds: i64 = row.get(6)?;
    let date_of_sale =
        OffsetDateTime::from_unix_timestamp_nanos(date_milliseconds as i128 * 1_000_000).map_err(
            |error| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Integer,
                    Box::new(error),
                )
            },
        )?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        sold: row.get(5)?,
        date_of_sale,
        image: row.get(7)?,
    })
}
