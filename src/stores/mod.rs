//! Contains traits and implementations for objects that store transactions.

mod transaction;

pub mod sqlite;

pub use sqlite::SQLiteTransactionStore;
pub use transaction::{OrderBy, SortOrder, TransactionStore};
