//! A local copy of the transaction list for clients of the API.
//!
//! The cache is only ever changed by a full refresh or by the result of a
//! write that the server accepted, so it never holds a transaction the server
//! rejected.

use time::UtcOffset;

use crate::{
    dashboard::{MonthlySummary, summarize_by_month},
    database_id::TransactionId,
    transaction::Transaction,
};

/// The result of a successful write to the transaction API.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The server stored a new transaction.
    Created(Transaction),
    /// The server overwrote an existing transaction.
    Updated(Transaction),
    /// The server deleted the transaction with this ID.
    Deleted(TransactionId),
}

/// Transactions kept in the same order as the list endpoint: most recent
/// date first, ties broken by the highest ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionCache {
    transactions: Vec<Transaction>,
}

impl TransactionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached transactions, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Replace the contents of the cache with `transactions`.
    pub fn refresh(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.sort();
    }

    /// Apply the result of a write that the server accepted.
    ///
    /// An update for a transaction that is not cached is inserted, and a
    /// delete for a transaction that is not cached does nothing.
    pub fn apply(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created(transaction) | WriteOutcome::Updated(transaction) => {
                match self.position(transaction.id) {
                    Some(index) => self.transactions[index] = transaction,
                    None => self.transactions.push(transaction),
                }
                self.sort();
            }
            WriteOutcome::Deleted(id) => {
                if let Some(index) = self.position(id) {
                    self.transactions.remove(index);
                }
            }
        }
    }

    /// The monthly expense totals of the cached transactions.
    pub fn monthly_summary(&self, offset: UtcOffset) -> MonthlySummary {
        summarize_by_month(&self.transactions, offset)
    }

    fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions
            .iter()
            .position(|transaction| transaction.id == id)
    }

    fn sort(&mut self) {
        self.transactions
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use serde_json::json;
    use time::{
        OffsetDateTime, UtcOffset,
        macros::datetime,
    };

    use crate::{
        database_id::TransactionId,
        db::initialize,
        stores::SQLiteTransactionStore,
        transaction::{
            Description, Transaction, TransactionInput, create_transaction, delete_transaction,
            list_transactions, update_transaction,
        },
    };

    use super::{TransactionCache, WriteOutcome};

    fn transaction(id: i64, amount: f64, date: OffsetDateTime) -> Transaction {
        Transaction {
            id: TransactionId::new_unchecked(id),
            amount,
            date,
            description: Description::new_unchecked("test"),
            created_at: date,
            updated_at: date,
        }
    }

    fn ids(cache: &TransactionCache) -> Vec<i64> {
        cache
            .transactions()
            .iter()
            .map(|transaction| transaction.id.as_i64())
            .collect()
    }

    #[test]
    fn refresh_sorts_by_date_then_id_descending() {
        let mut cache = TransactionCache::new();

        cache.refresh(vec![
            transaction(1, 1.0, datetime!(2024-01-01 0:00 UTC)),
            transaction(2, 1.0, datetime!(2024-03-01 0:00 UTC)),
            transaction(3, 1.0, datetime!(2024-01-01 0:00 UTC)),
        ]);

        assert_eq!(ids(&cache), [2, 3, 1]);
    }

    #[test]
    fn created_transaction_is_inserted_in_order() {
        let mut cache = TransactionCache::new();
        cache.refresh(vec![
            transaction(1, 1.0, datetime!(2024-01-01 0:00 UTC)),
            transaction(2, 1.0, datetime!(2024-03-01 0:00 UTC)),
        ]);

        cache.apply(WriteOutcome::Created(transaction(
            3,
            1.0,
            datetime!(2024-02-01 0:00 UTC),
        )));

        assert_eq!(ids(&cache), [2, 3, 1]);
    }

    #[test]
    fn updated_transaction_replaces_cached_copy() {
        let mut cache = TransactionCache::new();
        cache.refresh(vec![
            transaction(1, 1.0, datetime!(2024-01-01 0:00 UTC)),
            transaction(2, 1.0, datetime!(2024-03-01 0:00 UTC)),
        ]);

        cache.apply(WriteOutcome::Updated(transaction(
            1,
            9.0,
            datetime!(2024-04-01 0:00 UTC),
        )));

        assert_eq!(ids(&cache), [1, 2]);
        assert_eq!(cache.transactions()[0].amount, 9.0);
    }

    #[test]
    fn deleted_transaction_is_removed() {
        let mut cache = TransactionCache::new();
        cache.refresh(vec![transaction(1, 1.0, datetime!(2024-01-01 0:00 UTC))]);

        cache.apply(WriteOutcome::Deleted(TransactionId::new_unchecked(1)));
        cache.apply(WriteOutcome::Deleted(TransactionId::new_unchecked(1)));

        assert!(cache.transactions().is_empty());
    }

    #[test]
    fn monthly_summary_covers_cached_transactions() {
        let mut cache = TransactionCache::new();
        cache.refresh(vec![
            transaction(1, 100.0, datetime!(2024-01-15 0:00 UTC)),
            transaction(2, -50.0, datetime!(2024-01-20 0:00 UTC)),
        ]);

        let summary = cache.monthly_summary(UtcOffset::UTC);

        assert_eq!(summary.total, 150.0);
    }

    #[test]
    fn stays_in_sync_with_store_through_writes() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)));
        let input = |value| serde_json::from_value::<TransactionInput>(value).unwrap();
        let mut cache = TransactionCache::new();
        cache.refresh(list_transactions(&store).unwrap());

        let first = create_transaction(
            &store,
            input(json!({"amount": 5, "date": "2024-01-01", "description": "a"})),
        )
        .unwrap();
        cache.apply(WriteOutcome::Created(first.clone()));
        let second = create_transaction(
            &store,
            input(json!({"amount": 7, "date": "2024-02-01", "description": "b"})),
        )
        .unwrap();
        cache.apply(WriteOutcome::Created(second));
        let updated = update_transaction(
            &store,
            &first.id.to_string(),
            input(json!({"amount": 6, "date": "2024-03-01", "description": "a"})),
        )
        .unwrap();
        cache.apply(WriteOutcome::Updated(updated));

        // A rejected write yields no outcome to apply.
        assert!(
            create_transaction(
                &store,
                input(json!({"amount": "abc", "date": "2024-01-01", "description": "c"}))
            )
            .is_err()
        );

        let deleted = delete_transaction(&store, "2").unwrap();
        cache.apply(WriteOutcome::Deleted(deleted));

        assert_eq!(cache.transactions(), list_transactions(&store).unwrap());
    }
}
