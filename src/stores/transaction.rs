//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder},
};

/// Handles the persistence of transactions.
///
/// Implementers own the ID and the `created_at`/`updated_at` timestamps of each
/// transaction, and should enforce the same field constraints as
/// [TransactionInput::validate](crate::TransactionInput::validate) as a safety net.
///
/// Each method is a single-record operation, so callers never see a partial write.
pub trait TransactionStore {
    /// Store a new transaction and return it with its assigned ID and timestamps.
    fn insert(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve every transaction in the order given by `order_by`.
    fn find_all(&self, order_by: OrderBy) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction, or `None` if `id` does not refer to a stored transaction.
    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error>;

    /// Overwrite the fields of a transaction and refresh its `updated_at` timestamp.
    ///
    /// Returns `None` if `id` does not refer to a stored transaction. The ID and
    /// `created_at` timestamp are never changed.
    fn update_by_id(
        &self,
        id: TransactionId,
        builder: TransactionBuilder,
    ) -> Result<Option<Transaction>, Error>;

    /// Permanently remove a transaction.
    ///
    /// Returns `false` if `id` does not refer to a stored transaction.
    fn delete_by_id(&self, id: TransactionId) -> Result<bool, Error>;
}

/// Defines how transactions should be ordered by [TransactionStore::find_all].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    /// Order by when the transaction happened.
    Date(SortOrder),
    /// Order by when the transaction was stored.
    CreatedAt(SortOrder),
}

impl Default for OrderBy {
    /// Most recent transactions first.
    fn default() -> Self {
        OrderBy::Date(SortOrder::Descending)
    }
}

/// The order to sort transactions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

impl SortOrder {
    pub(crate) fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}
