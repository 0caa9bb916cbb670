//! SQLite backed implementations of the store traits.

pub mod transaction;

pub use transaction::{SQLiteTransactionStore, create_transaction_table};
