//! Dashboard module
//!
//! Provides an overview page with summary cards, a monthly expenses chart and
//! the transaction list, plus the monthly aggregation behind the chart.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use aggregation::{MAX_MONTHLY_BUCKETS, MonthlyBucket, MonthlySummary, summarize_by_month};
pub use handlers::{get_dashboard_page, get_monthly_summary_endpoint};
