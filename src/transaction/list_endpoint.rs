//! Defines the endpoint for listing every transaction.

use axum::{Json, extract::State};

use crate::{
    Error,
    transaction::{Transaction, service::list_transactions, state::TransactionState},
};

/// A route handler that responds with every transaction, most recent first.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    list_transactions(&state.store).map(Json)
}
