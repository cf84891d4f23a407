//! Output types for the behavioral insights pipeline
//!
//! Serialized field names follow the JSON contract consumed by the web
//! client (camelCase, except the historical `spending_patterns` key).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Confidence, Frequency, YearMonth};

/// Analysis window covered by the input transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    pub total_spend: f64,
    /// Percentage of income not spent; 0 without income
    pub savings_rate: f64,
    pub recurring_payments_count: usize,
    pub avg_monthly_income: f64,
    pub avg_monthly_spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownEntry {
    pub primary_category: String,
    pub total_amount: f64,
    /// Share of total spend, including uncategorized spend
    pub percentage: f64,
    pub detailed_breakdown: Vec<DetailedCategorySpend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCategorySpend {
    pub detailed_category: String,
    pub amount: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    pub month: YearMonth,
    pub income: f64,
    pub spend: f64,
    pub net: f64,
}

/// A detected recurring payment. Computed per run, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringPayment {
    pub merchant: String,
    /// Mean amount across the group
    pub amount: f64,
    pub frequency: Frequency,
    pub category: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatterns {
    pub fixed: f64,
    pub variable: f64,
    pub discretionary: f64,
}

impl SpendingPatterns {
    pub fn total(&self) -> f64 {
        self.fixed + self.variable + self.discretionary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_three_months: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub month: YearMonth,
    pub expected_spend: f64,
    pub confidence: Confidence,
}

/// Everything the pipeline derives from one transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralInsights {
    pub period: Period,
    pub summary: Summary,
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
    pub monthly_trends: Vec<MonthlyTrendPoint>,
    pub recurring_payments: Vec<RecurringPayment>,
    #[serde(rename = "spending_patterns")]
    pub spending_patterns: SpendingPatterns,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Forecast>,
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spending_patterns_total() {
        let patterns = SpendingPatterns {
            fixed: 1000.0,
            variable: 250.5,
            discretionary: 49.5,
        };
        assert_eq!(patterns.total(), 1300.0);
        assert_eq!(SpendingPatterns::default().total(), 0.0);
    }

    #[test]
    fn test_field_names_in_json() {
        let entry = CategoryBreakdownEntry {
            primary_category: "FOOD_AND_DRINK".to_string(),
            total_amount: 100.0,
            percentage: 100.0,
            detailed_breakdown: vec![DetailedCategorySpend {
                detailed_category: "FOOD_AND_DRINK_GROCERIES".to_string(),
                amount: 100.0,
                transaction_count: 2,
            }],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["primaryCategory"], "FOOD_AND_DRINK");
        assert_eq!(json["totalAmount"], 100.0);
        assert_eq!(json["detailedBreakdown"][0]["transactionCount"], 2);

        let point = ForecastPoint {
            month: YearMonth::new(2024, 5).unwrap(),
            expected_spend: 200.0,
            confidence: Confidence::High,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["month"], "2024-05");
        assert_eq!(json["expectedSpend"], 200.0);
        assert_eq!(json["confidence"], "high");
    }
}
