//! Recurring payment detection
//!
//! A recurring payment is a group of expenses to the same counterparty with
//! near-equal amounts and a regular interval:
//! 1. At least 3 transactions to establish a pattern
//! 2. Every amount within 10% of the group mean (one outlier rejects the
//!    whole group)
//! 3. A mean gap between consecutive payments that falls in a weekly,
//!    monthly, or yearly band
//!
//! The thresholds and bands are part of the output contract and are kept
//! as-is rather than tuned.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Frequency, Transaction};

use super::categories::by_amount_desc;
use super::types::RecurringPayment;

/// Minimum occurrences before a counterparty can be recurring
pub const MIN_OCCURRENCES: usize = 3;

/// Maximum relative deviation of any amount from the group mean (exclusive)
pub const AMOUNT_TOLERANCE: f64 = 0.10;

/// Reported merchant names are cut to this many characters
pub const MERCHANT_NAME_MAX_CHARS: usize = 50;

/// Category reported when the group's first transaction has none
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// Classify a mean interval in days. Bands are inclusive.
pub fn classify_interval(mean_gap_days: f64) -> Option<Frequency> {
    if (25.0..=35.0).contains(&mean_gap_days) {
        Some(Frequency::Monthly)
    } else if (360.0..=370.0).contains(&mean_gap_days) {
        Some(Frequency::Yearly)
    } else if (5.0..=9.0).contains(&mean_gap_days) {
        Some(Frequency::Weekly)
    } else {
        None
    }
}

/// Find recurring payments among the expense transactions, largest first
pub fn detect_recurring_payments(transactions: &[Transaction]) -> Vec<RecurringPayment> {
    // Keyed on the full counterparty so groups come out in a fixed order even
    // when truncated names collide. Insertion order is kept within a group.
    let mut by_counterparty: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        by_counterparty.entry(tx.counterparty()).or_default().push(tx);
    }

    let mut recurring: Vec<RecurringPayment> = by_counterparty
        .into_iter()
        .filter_map(|(counterparty, group)| detect_group(&counterparty, &group))
        .collect();

    // Stable: full ties stay in counterparty order
    recurring.sort_by(|a, b| {
        by_amount_desc(a.amount, b.amount).then_with(|| a.merchant.cmp(&b.merchant))
    });

    debug!("Detected {} recurring payments", recurring.len());
    recurring
}

/// Check one counterparty group
fn detect_group(counterparty: &str, group: &[&Transaction]) -> Option<RecurringPayment> {
    if group.len() < MIN_OCCURRENCES {
        return None;
    }

    let mean_amount = group.iter().map(|t| t.amount).sum::<f64>() / group.len() as f64;
    if mean_amount <= 0.0 {
        return None;
    }

    let amounts_consistent = group
        .iter()
        .all(|t| (t.amount - mean_amount).abs() / mean_amount < AMOUNT_TOLERANCE);
    if !amounts_consistent {
        debug!("{}: amounts vary more than 10% from the mean", counterparty);
        return None;
    }

    let mut dates: Vec<_> = group.iter().map(|t| t.date).collect();
    dates.sort();

    let gaps: Vec<i64> = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
    let mean_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;

    let Some(frequency) = classify_interval(mean_gap) else {
        debug!("{}: irregular mean interval of {:.1} days", counterparty, mean_gap);
        return None;
    };

    Some(RecurringPayment {
        merchant: counterparty.chars().take(MERCHANT_NAME_MAX_CHARS).collect(),
        amount: mean_amount,
        frequency,
        category: group[0]
            .primary_category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
    })
}
