//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for describing new transactions
//! - Validation of JSON request bodies
//! - The create, list, update and delete operations and their route handlers

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod input;
mod list_endpoint;
mod service;
mod state;

pub use core::{Description, MAX_DESCRIPTION_LENGTH, Transaction, TransactionBuilder};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use input::TransactionInput;
pub use list_endpoint::list_transactions_endpoint;
pub use service::{create_transaction, delete_transaction, list_transactions, update_transaction};
