//! Spendlog is a web app for recording personal transactions and seeing how
//! much you spend each month.
//!
//! This library provides a JSON REST API for creating, listing, updating and
//! deleting transactions, plus a server rendered dashboard with a monthly
//! expenses chart.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod cache;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod logging;
mod not_found;
mod routing;
mod stores;
mod timezone;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use cache::{TransactionCache, WriteOutcome};
pub use dashboard::{MAX_MONTHLY_BUCKETS, MonthlyBucket, MonthlySummary, summarize_by_month};
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use stores::{OrderBy, SQLiteTransactionStore, SortOrder, TransactionStore};
pub use timezone::get_local_offset;
pub use transaction::{
    Description, MAX_DESCRIPTION_LENGTH, Transaction, TransactionBuilder, TransactionInput,
    create_transaction, delete_transaction, list_transactions, update_transaction,
};
pub use validation::ValidationError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request field was missing or malformed, or the transaction ID in
    /// the URL is not a valid ID.
    ///
    /// The client should fix the named field and try again.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // The CHECK and NOT NULL constraints on the transaction table
            // mirror the validation done on incoming requests.
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    extended_code:
                        rusqlite::ffi::SQLITE_CONSTRAINT_CHECK
                        | rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
                    ..
                },
                description,
            ) => {
                tracing::warn!("a write was rejected by a table constraint: {description:?}");
                Error::Validation(ValidationError::new(
                    "record",
                    "violates a storage constraint",
                ))
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                StatusCode::NOT_FOUND
            }
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Error::Validation(error) => ErrorBody {
                error: error.to_string(),
                field: Some(error.field),
            },
            Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => ErrorBody {
                error: "Transaction not found".to_owned(),
                field: None,
            },
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorBody {
                    error: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                    field: None,
                }
            }
        };

        (status_code, Json(body)).into_response()
    }
}
