//! Summary cards shown at the top of the dashboard.

use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    dashboard::aggregation::{round_to_cents, saturating_add},
    html::format_currency,
    transaction::Transaction,
};

/// The headline figures for a set of transactions.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SummaryStats {
    pub count: usize,
    /// The sum of the absolute amounts.
    pub total_expenses: f64,
    /// The sum of the absolute amounts in the calendar month containing `now`.
    pub this_month: f64,
    /// `total_expenses` divided by `count`, zero when there are no transactions.
    pub average_per_transaction: f64,
}

/// Calculate the card figures for `transactions`.
///
/// `now` decides the current month, and its offset decides which month each
/// transaction falls in.
pub(super) fn summary_stats(transactions: &[Transaction], now: OffsetDateTime) -> SummaryStats {
    let offset = now.offset();
    let current_month = (now.year(), now.month());

    let mut total_expenses = 0.0;
    let mut this_month = 0.0;

    for transaction in transactions {
        let amount = transaction.amount.abs();
        total_expenses = saturating_add(total_expenses, amount);

        let date = transaction.date.to_offset(offset);
        if (date.year(), date.month()) == current_month {
            this_month = saturating_add(this_month, amount);
        }
    }

    let count = transactions.len();
    let average_per_transaction = if count == 0 {
        0.0
    } else {
        total_expenses / count as f64
    };

    SummaryStats {
        count,
        total_expenses: round_to_cents(total_expenses),
        this_month: round_to_cents(this_month),
        average_per_transaction: round_to_cents(average_per_transaction),
    }
}

pub(super) fn summary_cards_view(stats: &SummaryStats) -> Markup {
    html! {
        section id="summary-cards" class="w-full mx-auto mt-8 mb-8"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (card("Transactions", &stats.count.to_string()))
                (card("Total Expenses", &format_currency(stats.total_expenses)))
                (card("This Month", &format_currency(stats.this_month)))
                (card("Average per Transaction", &format_currency(stats.average_per_transaction)))
            }
        }
    }
}

fn card(title: &str, value: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{title}: {value}"))
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-2" { (title) }
            p class="text-2xl font-semibold" { (value) }
        }
    }
}
