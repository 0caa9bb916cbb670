//! Database ID type definitions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The store-assigned identifier of a transaction.
///
/// IDs are positive integers handed out by SQLite's `AUTOINCREMENT`, so an ID
/// is never reused after its transaction is deleted.
///
/// Parse untrusted input (e.g., a URL path segment) with [str::parse]. Anything
/// that is not a plain positive decimal integer is rejected with a
/// [ValidationError] on the `id` field before the database is ever queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(DatabaseId);

impl TransactionId {
    /// Wrap a raw database ID.
    ///
    /// The caller should ensure that `id` came from the database.
    pub fn new_unchecked(id: DatabaseId) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> DatabaseId {
        self.0
    }
}

impl FromStr for TransactionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || ValidationError::new("id", format!("\"{s}\" is not a valid transaction ID"));

        // `i64::from_str` also accepts a leading '+', which is not a valid ID.
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed());
        }

        match s.parse::<DatabaseId>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(malformed()),
        }
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for TransactionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for TransactionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        DatabaseId::column_result(value).map(Self)
    }
}
