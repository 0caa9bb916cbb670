//! Defines the core data model for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{database_id::TransactionId, validation::ValidationError};

/// The maximum number of characters allowed in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are only ever created by a
/// [TransactionStore](crate::stores::TransactionStore), which assigns the ID
/// and the timestamps. To describe a new transaction, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always finite. The sign is not interpreted: summaries use the absolute
    /// value.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: Description,
    /// When the transaction was first stored.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last written to.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Describe a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: OffsetDateTime, description: Description) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description,
        }
    }
}

/// The client-settable fields of a [Transaction].
///
/// Used both to insert new transactions and to overwrite the fields of an
/// existing one. The store is responsible for the ID and timestamps.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    ///
    /// # Examples
    /// - `150.00` - Salary deposit
    /// - `-45.99` - Coffee shop purchase
    /// - `0.0` - A refunded order
    pub amount: f64,

    /// The instant at which the transaction occurred.
    ///
    /// Stores normalise this to UTC, the offset it was given in is not kept.
    pub date: OffsetDateTime,

    /// A human-readable description of the transaction.
    pub description: Description,
}

/// A validated transaction description.
///
/// Descriptions are trimmed of surrounding whitespace and must then contain
/// between 1 and [MAX_DESCRIPTION_LENGTH] characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a description from untrusted text.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] on the `description` field if `text` is
    /// empty after trimming or longer than [MAX_DESCRIPTION_LENGTH] characters.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ValidationError::new("description", "cannot be empty"));
        }

        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::new(
                "description",
                format!("cannot exceed {MAX_DESCRIPTION_LENGTH} characters"),
            ));
        }

        Ok(Self(text.to_owned()))
    }

    /// Create a description without validation.
    ///
    /// The caller should ensure that the string is trimmed, not empty and not too long.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the
    /// invariants are violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Description {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Description::new(s)
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Description::new(&value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Description {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for Description {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = String::column_result(value)?;

        Description::new(&text).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
