//! The transaction operations behind the REST API.
//!
//! These functions hold no state of their own: each call validates its input
//! and performs at most one write against the store.

use crate::{
    Error,
    database_id::TransactionId,
    stores::{OrderBy, TransactionStore},
    transaction::{core::Transaction, input::TransactionInput},
};

/// Get every transaction, most recent first.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn list_transactions(store: &impl TransactionStore) -> Result<Vec<Transaction>, Error> {
    store.find_all(OrderBy::default())
}

/// Validate `input` and store it as a new transaction.
///
/// # Errors
/// Returns an [Error::Validation] if a field is missing or invalid, or a
/// storage error if the transaction could not be written.
pub fn create_transaction(
    store: &impl TransactionStore,
    input: TransactionInput,
) -> Result<Transaction, Error> {
    let builder = input.validate()?;

    store.insert(builder)
}

/// Overwrite the fields of the transaction identified by `id`.
///
/// `id` is checked before the fields, and both are checked before the store
/// is queried.
///
/// # Errors
/// Returns an:
/// - [Error::Validation] if `id` is malformed or a field is missing or invalid,
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a transaction,
/// - or a storage error if the transaction could not be written.
pub fn update_transaction(
    store: &impl TransactionStore,
    id: &str,
    input: TransactionInput,
) -> Result<Transaction, Error> {
    let id: TransactionId = id.parse()?;
    let builder = input.validate()?;

    store
        .update_by_id(id, builder)?
        .ok_or(Error::UpdateMissingTransaction)
}

/// Permanently delete the transaction identified by `id`.
///
/// # Errors
/// Returns an:
/// - [Error::Validation] if `id` is malformed,
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a transaction,
/// - or a storage error if the transaction could not be deleted.
pub fn delete_transaction(store: &impl TransactionStore, id: &str) -> Result<TransactionId, Error> {
    let id: TransactionId = id.parse()?;

    if store.delete_by_id(id)? {
        Ok(id)
    } else {
        Err(Error::DeleteMissingTransaction)
    }
}
