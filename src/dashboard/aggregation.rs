//! Monthly aggregation of transaction amounts.
//!
//! Groups transactions by calendar month, sums how much money moved in each
//! month and keeps the most recent months for charting.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Month, UtcOffset};

use crate::transaction::Transaction;

/// The most months a [MonthlySummary] will hold.
pub const MAX_MONTHLY_BUCKETS: usize = 12;

/// The total spend for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// A display label, e.g. "Jan 2024".
    pub month: String,
    /// The sum of the absolute transaction amounts in the month, rounded to cents.
    pub amount: f64,
    /// The month as "YYYY-MM", which sorts chronologically.
    pub sort_key: String,
}

/// The monthly buckets for a set of transactions, oldest month first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// At most [MAX_MONTHLY_BUCKETS] of the most recent months with transactions.
    pub buckets: Vec<MonthlyBucket>,
    /// The sum of the bucket amounts.
    pub total: f64,
    /// The mean bucket amount, zero when there are no buckets. Not rounded.
    pub average: f64,
}

/// Group `transactions` into calendar months and total the spend in each.
///
/// Months are read from each transaction's date in the `offset` timezone.
/// The sign of an amount is ignored so refunds and income count towards the
/// month's total the same as expenses. Months without transactions are not
/// filled in.
///
/// Sums stop at [f64::MAX] rather than overflowing to infinity.
///
/// The result does not depend on the order of `transactions`.
pub fn summarize_by_month(transactions: &[Transaction], offset: UtcOffset) -> MonthlySummary {
    let mut totals: BTreeMap<(i32, Month), f64> = BTreeMap::new();

    for transaction in transactions {
        let date = transaction.date.to_offset(offset).date();
        let total = totals.entry((date.year(), date.month())).or_insert(0.0);
        *total = saturating_add(*total, transaction.amount.abs());
    }

    let skip = totals.len().saturating_sub(MAX_MONTHLY_BUCKETS);
    let buckets: Vec<MonthlyBucket> = totals
        .into_iter()
        .skip(skip)
        .map(|((year, month), total)| MonthlyBucket {
            month: format!("{} {year}", month_abbreviation(month)),
            amount: round_to_cents(total),
            sort_key: format!("{year:04}-{:02}", u8::from(month)),
        })
        .collect();

    let total = round_to_cents(
        buckets
            .iter()
            .fold(0.0, |total, bucket| saturating_add(total, bucket.amount)),
    );
    let average = if buckets.is_empty() {
        0.0
    } else {
        total / buckets.len() as f64
    };

    MonthlySummary {
        buckets,
        total,
        average,
    }
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

pub(super) fn round_to_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;

    // Amounts this large have no cents to round.
    if rounded.is_finite() { rounded } else { amount }
}

pub(super) fn saturating_add(total: f64, amount: f64) -> f64 {
    (total + amount).min(f64::MAX)
}

#[cfg(test)]
mod tests {
    use time::{
        OffsetDateTime, UtcOffset,
        macros::{datetime, offset},
    };

    use crate::{
        database_id::TransactionId,
        transaction::{Description, Transaction},
    };

    use super::{MAX_MONTHLY_BUCKETS, summarize_by_month};

    fn transaction(id: i64, amount: f64, date: OffsetDateTime) -> Transaction {
        Transaction {
            id: TransactionId::new_unchecked(id),
            amount,
            date,
            description: Description::new_unchecked("test"),
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn empty_input_has_no_buckets() {
        let summary = summarize_by_month(&[], UtcOffset::UTC);

        assert!(summary.buckets.is_empty());
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn sums_absolute_amounts_per_month() {
        let transactions = [
            transaction(1, 100.0, datetime!(2024-01-15 0:00 UTC)),
            transaction(2, -50.0, datetime!(2024-01-20 0:00 UTC)),
        ];

        let summary = summarize_by_month(&transactions, UtcOffset::UTC);

        assert_eq!(summary.buckets.len(), 1);
        assert_eq!(summary.buckets[0].month, "Jan 2024");
        assert_eq!(summary.buckets[0].sort_key, "2024-01");
        assert_eq!(summary.buckets[0].amount, 150.0);
        assert_eq!(summary.total, 150.0);
        assert_eq!(summary.average, 150.0);
    }

    #[test]
    fn rounds_bucket_totals_to_cents() {
        let transactions = [
            transaction(1, 0.1, datetime!(2024-03-01 0:00 UTC)),
            transaction(2, 0.2, datetime!(2024-03-02 0:00 UTC)),
            transaction(3, 10.006, datetime!(2024-04-02 0:00 UTC)),
        ];

        let summary = summarize_by_month(&transactions, UtcOffset::UTC);

        assert_eq!(summary.buckets[0].amount, 0.3);
        assert_eq!(summary.buckets[1].amount, 10.01);
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let mut transactions = vec![
            transaction(1, 12.5, datetime!(2023-11-30 23:00 UTC)),
            transaction(2, -3.25, datetime!(2024-02-01 0:00 UTC)),
            transaction(3, 40.0, datetime!(2023-11-01 0:00 UTC)),
            transaction(4, 7.0, datetime!(2024-02-29 12:00 UTC)),
        ];

        let forward = summarize_by_month(&transactions, UtcOffset::UTC);
        transactions.reverse();
        let reversed = summarize_by_month(&transactions, UtcOffset::UTC);
        transactions.swap(0, 2);
        let shuffled = summarize_by_month(&transactions, UtcOffset::UTC);

        assert_eq!(forward, reversed);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn keeps_twelve_most_recent_months_in_ascending_order() {
        let transactions: Vec<Transaction> = (0..18)
            .map(|i| {
                let year = 2023 + i / 12;
                let month = time::Month::try_from((i % 12 + 1) as u8).unwrap();
                let date = time::Date::from_calendar_date(year, month, 10)
                    .unwrap()
                    .midnight()
                    .assume_utc();
                transaction(i64::from(i) + 1, 1.0, date)
            })
            .collect();

        let summary = summarize_by_month(&transactions, UtcOffset::UTC);

        assert_eq!(summary.buckets.len(), MAX_MONTHLY_BUCKETS);
        assert_eq!(summary.buckets[0].sort_key, "2023-07");
        assert_eq!(summary.buckets[11].sort_key, "2024-06");
        assert!(
            summary
                .buckets
                .windows(2)
                .all(|pair| pair[0].sort_key < pair[1].sort_key),
            "buckets should be strictly ascending: {:?}",
            summary.buckets
        );
        assert_eq!(summary.total, 12.0);
        assert_eq!(summary.average, 1.0);
    }

    #[test]
    fn does_not_fill_in_empty_months() {
        let transactions = [
            transaction(1, 5.0, datetime!(2024-01-15 0:00 UTC)),
            transaction(2, 15.0, datetime!(2024-06-15 0:00 UTC)),
        ];

        let summary = summarize_by_month(&transactions, UtcOffset::UTC);

        let keys: Vec<&str> = summary.buckets.iter().map(|b| b.sort_key.as_str()).collect();
        assert_eq!(keys, ["2024-01", "2024-06"]);
        assert_eq!(summary.average, 10.0);
    }

    #[test]
    fn average_is_not_rounded() {
        let transactions = [
            transaction(1, 5.0, datetime!(2024-01-15 0:00 UTC)),
            transaction(2, 3.0, datetime!(2024-02-15 0:00 UTC)),
            transaction(3, 2.0, datetime!(2024-03-15 0:00 UTC)),
        ];

        let summary = summarize_by_month(&transactions, UtcOffset::UTC);

        assert_eq!(summary.total, 10.0);
        assert_eq!(summary.average, 10.0 / 3.0);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let transactions = [
            transaction(1, f64::MAX, datetime!(2024-01-15 0:00 UTC)),
            transaction(2, -f64::MAX, datetime!(2024-01-20 0:00 UTC)),
            transaction(3, f64::MAX, datetime!(2024-02-15 0:00 UTC)),
        ];

        let summary = summarize_by_month(&transactions, UtcOffset::UTC);

        assert_eq!(summary.buckets[0].amount, f64::MAX);
        assert_eq!(summary.buckets[1].amount, f64::MAX);
        assert_eq!(summary.total, f64::MAX);
        assert_eq!(summary.average, f64::MAX / 2.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], f64::MAX);
        assert_eq!(json["buckets"][0]["amount"], f64::MAX);
    }

    #[test]
    fn months_are_read_in_the_given_offset() {
        let transactions = [transaction(1, 20.0, datetime!(2024-01-31 20:00 UTC))];

        let utc = summarize_by_month(&transactions, UtcOffset::UTC);
        let auckland = summarize_by_month(&transactions, offset!(+13));

        assert_eq!(utc.buckets[0].sort_key, "2024-01");
        assert_eq!(auckland.buckets[0].sort_key, "2024-02");
        assert_eq!(auckland.buckets[0].month, "Feb 2024");
    }
}
