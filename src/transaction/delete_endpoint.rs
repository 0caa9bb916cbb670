//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    Error,
    transaction::{service::delete_transaction, state::TransactionState},
};

/// A route handler for permanently deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let transaction_id = delete_transaction(&state.store, &transaction_id)?;

    tracing::info!("deleted transaction {transaction_id}");

    Ok(Json(json!({"message": "Transaction deleted successfully"})))
}
