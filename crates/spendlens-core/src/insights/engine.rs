//! Insight Engine - runs the full behavioral insights pipeline

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::taxonomy::CategoryTaxonomy;

use super::categories::{build_category_breakdown, percentage_of};
use super::forecast::forecast_spend;
use super::narrator::{narrate, NarratorInputs};
use super::patterns::classify_spending;
use super::period::{months_spanned, resolve_period};
use super::recurring::detect_recurring_payments;
use super::trends::build_monthly_trends;
use super::types::{BehavioralInsights, Summary};

/// Derive behavioral insights using the built-in category buckets.
///
/// Fails with [`Error::InsufficientData`] for an empty transaction list.
pub fn generate_insights(transactions: &[Transaction]) -> Result<BehavioralInsights> {
    InsightEngine::default().generate(transactions)
}

/// Pipeline bound to a shared, read-only category taxonomy
#[derive(Debug, Clone)]
pub struct InsightEngine {
    taxonomy: Arc<CategoryTaxonomy>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(Arc::new(CategoryTaxonomy::default()))
    }
}

impl InsightEngine {
    pub fn new(taxonomy: Arc<CategoryTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    /// Run every stage over one transaction set. Pure: the same input
    /// always yields the same output.
    pub fn generate(&self, transactions: &[Transaction]) -> Result<BehavioralInsights> {
        let period = resolve_period(transactions).ok_or_else(|| {
            Error::InsufficientData("no transactions to analyze".to_string())
        })?;

        let (total_income, total_spend) =
            transactions.iter().fold((0.0, 0.0), |(income, spend), tx| {
                if tx.is_income() {
                    (income + tx.amount, spend)
                } else {
                    (income, spend + tx.amount)
                }
            });

        let savings_rate = percentage_of(total_income - total_spend, total_income);
        let months = f64::from(months_spanned(&period));

        let category_breakdown =
            build_category_breakdown(transactions, total_spend, &self.taxonomy);
        let monthly_trends = build_monthly_trends(transactions);
        let recurring_payments = detect_recurring_payments(transactions);
        let spending_patterns = classify_spending(transactions, &self.taxonomy);
        let forecast = forecast_spend(&monthly_trends);

        let insights = narrate(&NarratorInputs {
            category_breakdown: &category_breakdown,
            recurring_payments: &recurring_payments,
            spending_patterns: &spending_patterns,
            monthly_trends: &monthly_trends,
        });

        debug!(
            "Insights for {} transactions ({} to {}): {} categories, {} months, {} recurring, forecast: {}",
            transactions.len(),
            period.start,
            period.end,
            category_breakdown.len(),
            monthly_trends.len(),
            recurring_payments.len(),
            forecast.is_some()
        );

        Ok(BehavioralInsights {
            period,
            summary: Summary {
                total_income,
                total_spend,
                savings_rate,
                recurring_payments_count: recurring_payments.len(),
                avg_monthly_income: total_income / months,
                avg_monthly_spend: total_spend / months,
            },
            category_breakdown,
            monthly_trends,
            recurring_payments,
            spending_patterns,
            forecast,
            insights,
        })
    }
}
