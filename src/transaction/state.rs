use axum::extract::FromRef;

use crate::{AppState, stores::SQLiteTransactionStore};

/// The state needed by the transaction API endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The store for reading and writing transactions.
    pub store: SQLiteTransactionStore,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: SQLiteTransactionStore::new(state.db_connection.clone()),
        }
    }
}
