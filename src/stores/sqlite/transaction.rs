//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    database_id::TransactionId,
    stores::transaction::{OrderBy, TransactionStore},
    transaction::{Transaction, TransactionBuilder},
};

/// Stores transactions in a SQLite database.
///
/// The `transaction` table must exist, see [create_transaction_table] or
/// [initialize_db](crate::initialize_db).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

const SELECT_COLUMNS: &str = "id, amount, date, description, created_at, updated_at";

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the fields violate a table constraint,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn insert(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();
        let connection = self.lock()?;

        let transaction = connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (amount, date, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 RETURNING {SELECT_COLUMNS}"
            ))?
            .query_row(
                params![
                    builder.amount,
                    builder.date.to_offset(UtcOffset::UTC),
                    builder.description,
                    now,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve all transactions, ties are broken by ID in the same direction.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn find_all(&self, order_by: OrderBy) -> Result<Vec<Transaction>, Error> {
        let (column, order) = match order_by {
            OrderBy::Date(order) => ("date", order.as_sql()),
            OrderBy::CreatedAt(order) => ("created_at", order.as_sql()),
        };

        self.lock()?
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM \"transaction\" ORDER BY {column} {order}, id {order}"
            ))?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)
            .optional()?;

        Ok(transaction)
    }

    /// Overwrite the amount, date and description of a transaction.
    ///
    /// The new `updated_at` is the current time, or the previous `updated_at`
    /// if the system clock has gone backwards since.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the fields violate a table constraint,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update_by_id(
        &self,
        id: TransactionId,
        builder: TransactionBuilder,
    ) -> Result<Option<Transaction>, Error> {
        let connection = self.lock()?;
        let sql_transaction = connection.unchecked_transaction()?;

        let previous_updated_at: Option<OffsetDateTime> = sql_transaction
            .query_row(
                "SELECT updated_at FROM \"transaction\" WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(previous_updated_at) = previous_updated_at else {
            return Ok(None);
        };

        let updated_at = OffsetDateTime::now_utc().max(previous_updated_at);

        let transaction = sql_transaction
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET amount = ?1, date = ?2, description = ?3, updated_at = ?4
                 WHERE id = ?5
                 RETURNING {SELECT_COLUMNS}"
            ))?
            .query_row(
                params![
                    builder.amount,
                    builder.date.to_offset(UtcOffset::UTC),
                    builder.description,
                    updated_at,
                    id,
                ],
                map_transaction_row,
            )?;

        sql_transaction.commit()?;

        Ok(Some(transaction))
    }

    /// Delete a transaction from the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn delete_by_id(&self, id: TransactionId) -> Result<bool, Error> {
        let rows_affected = self.lock()?.execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )?;

        Ok(rows_affected > 0)
    }
}

/// Create the transaction table in the database.
///
/// The `CHECK` constraints repeat the request validation so that a bad write
/// cannot reach the table through some other path. `9e999` is how SQLite
/// spells infinity; `NaN` is stored as `NULL` and caught by `NOT NULL`.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (abs(amount) < 9e999),
                date TEXT NOT NULL,
                description TEXT NOT NULL
                    CHECK (length(description) BETWEEN 1 AND 500 AND description = trim(description)),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date DESC);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at DESC);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description = row.get(3)?;
    let created_at = row.get(4)?;
    let updated_at = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        date,
        description,
        created_at,
        updated_at,
    })
}
