//! Human-readable insight statements
//!
//! Deterministic templates over already computed aggregates. At most four
//! statements, always in this order:
//! 1. Largest category and its largest sub-category
//! 2. Monthly recurring payments
//! 3. Share of fixed costs
//! 4. Recent spend trend (only when it moved more than 5%)

use super::categories::percentage_of;
use super::trends::mean_spend;
use super::types::{
    CategoryBreakdownEntry, MonthlyTrendPoint, RecurringPayment, SpendingPatterns,
};
use crate::models::Frequency;

/// Months in each of the two windows compared by the trend statement
pub const TREND_WINDOW_MONTHS: usize = 3;

/// Minimum absolute percentage change before the trend is mentioned
pub const TREND_CHANGE_THRESHOLD_PERCENT: f64 = 5.0;

/// Aggregates the narrator reads from
pub struct NarratorInputs<'a> {
    pub category_breakdown: &'a [CategoryBreakdownEntry],
    pub recurring_payments: &'a [RecurringPayment],
    pub spending_patterns: &'a SpendingPatterns,
    pub monthly_trends: &'a [MonthlyTrendPoint],
}

pub fn narrate(inputs: &NarratorInputs<'_>) -> Vec<String> {
    [
        top_category_statement(inputs.category_breakdown),
        recurring_statement(inputs.recurring_payments),
        fixed_cost_statement(inputs.spending_patterns),
        trend_statement(inputs.monthly_trends),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn top_category_statement(breakdown: &[CategoryBreakdownEntry]) -> Option<String> {
    let top = breakdown.first()?;
    let mut statement = format!(
        "Your largest spend is {}, accounting for {:.1}% of your total outgoings.",
        top.primary_category, top.percentage
    );

    if let Some(detailed) = top.detailed_breakdown.first() {
        statement.push_str(&format!(
            " Within {}, you spend the most on {} ({:.2}).",
            top.primary_category, detailed.detailed_category, detailed.amount
        ));
    }

    Some(statement)
}

fn recurring_statement(recurring: &[RecurringPayment]) -> Option<String> {
    let monthly: Vec<&RecurringPayment> = recurring
        .iter()
        .filter(|r| r.frequency == Frequency::Monthly)
        .collect();

    if monthly.is_empty() {
        return None;
    }

    let total: f64 = monthly.iter().map(|r| r.amount).sum();
    let noun = if monthly.len() == 1 {
        "payment"
    } else {
        "payments"
    };

    Some(format!(
        "You have {} recurring monthly {} totaling {:.2}.",
        monthly.len(),
        noun,
        total
    ))
}

fn fixed_cost_statement(patterns: &SpendingPatterns) -> Option<String> {
    let total = patterns.total();
    if total <= 0.0 {
        return None;
    }

    Some(format!(
        "{:.1}% of your spending is on fixed costs (rent, utilities, loans).",
        percentage_of(patterns.fixed, total)
    ))
}

/// Compare the trailing 3 months with up to 3 months before them
fn trend_statement(trends: &[MonthlyTrendPoint]) -> Option<String> {
    if trends.len() <= TREND_WINDOW_MONTHS {
        return None;
    }

    let split = trends.len() - TREND_WINDOW_MONTHS;
    let recent = &trends[split..];
    let prior = &trends[split.saturating_sub(TREND_WINDOW_MONTHS)..split];

    let prior_avg = mean_spend(prior);
    if prior_avg <= 0.0 {
        return None;
    }

    let change = (mean_spend(recent) - prior_avg) / prior_avg * 100.0;
    if change.abs() <= TREND_CHANGE_THRESHOLD_PERCENT {
        return None;
    }

    Some(format!(
        "Your spending has {} by {:.1}% over the last 3 months.",
        if change > 0.0 { "increased" } else { "decreased" },
        change.abs()
    ))
}
