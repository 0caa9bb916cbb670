//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and the monthly summary API
//! - HTML view functions for rendering the dashboard UI

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{MonthlySummary, summarize_by_month},
        cards::{summary_cards_view, summary_stats},
        charts::{DashboardChart, charts_script, charts_view, monthly_expenses_chart},
        tables::transactions_table,
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    stores::SQLiteTransactionStore,
    timezone::get_local_offset,
    transaction::{Transaction, list_transactions},
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store for reading transactions.
    pub store: SQLiteTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: SQLiteTransactionStore::new(state.db_connection.clone()),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl DashboardState {
    fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }
}

/// Display a page with an overview of the user's spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let local_offset = state.local_offset()?;
    let transactions = list_transactions(&state.store)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view().into_response());
    }

    let now = OffsetDateTime::now_utc().to_offset(local_offset);

    Ok(dashboard_view(&transactions, now).into_response())
}

/// Respond with the monthly expense totals of all transactions as JSON.
pub async fn get_monthly_summary_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<MonthlySummary>, Error> {
    let local_offset = state.local_offset()?;
    let transactions = list_transactions(&state.store)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(Json(summarize_by_month(&transactions, local_offset)))
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view() -> Markup {
    let transactions_link = link(endpoints::TRANSACTIONS, endpoints::TRANSACTIONS);

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p data-empty-state="true"
            {
                "Charts will show up here once you add some transactions.
                You can add transactions by sending them to " (transactions_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary cards, the monthly chart and
/// the transaction list.
///
/// `transactions` should be sorted most recent first and `now` should be in
/// the local timezone.
fn dashboard_view(transactions: &[Transaction], now: OffsetDateTime) -> Markup {
    let offset = now.offset();
    let stats = summary_stats(transactions, now);
    let summary = summarize_by_month(transactions, offset);
    let charts = [DashboardChart {
        id: "monthly-expenses-chart",
        options: monthly_expenses_chart(&summary).to_string(),
    }];

    let content = html!(
        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            (summary_cards_view(&stats))
            (charts_view(&charts))
            (transactions_table(transactions, offset))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}
