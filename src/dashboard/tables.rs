//! The transaction list shown below the dashboard chart.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    endpoints::{self, format_endpoint},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::Transaction,
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

/// Renders `transactions` as a table in the order given.
///
/// Dates are shown as calendar dates in the `offset` timezone.
pub(super) fn transactions_table(transactions: &[Transaction], offset: UtcOffset) -> Markup {
    html! {
        section id="transactions" class="w-full mx-auto mb-8"
        {
            h3 class="text-xl font-semibold mb-4" { "Transactions" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row(transaction, offset))
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, offset: UtcOffset) -> Markup {
    let date_string = transaction.date.to_offset(offset).date().to_string();

    html! {
        tr
            class=(TABLE_ROW_STYLE)
            data-transaction-row="true"
            data-endpoint=(format_endpoint(endpoints::TRANSACTION, transaction.id))
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(date_string) { (date_string) } }
            td class=(TABLE_CELL_STYLE) { (transaction.description.as_ref()) }
            td class={ "px-6 py-4 text-right " (amount_color_class(transaction.amount)) }
            {
                (format_currency(transaction.amount))
            }
        }
    }
}
