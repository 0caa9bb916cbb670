//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    transaction::{
        TransactionInput, input::accept_json, service::create_transaction,
        state::TransactionState,
    },
};

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created`, the stored transaction and its location.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let input = accept_json(payload)?;
    let transaction = create_transaction(&state.store, input)?;

    tracing::info!("created transaction {}", transaction.id);

    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)))
}
