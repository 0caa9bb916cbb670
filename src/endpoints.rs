//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

use crate::database_id::TransactionId;

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page showing the summary cards, monthly chart and transaction list.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for the monthly expense totals.
pub const MONTHLY_SUMMARY: &str = "/api/summary/monthly";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace and ends with a
/// right brace. For example, in the endpoint path '/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: TransactionId) -> String {
    let Some((head, rest)) = endpoint_path.split_once('{') else {
        return endpoint_path.to_owned();
    };

    let tail = rest.split_once('}').map_or("", |(_, tail)| tail);

    format!("{head}{id}{tail}")
}
