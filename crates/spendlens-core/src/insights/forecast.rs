//! Short-horizon spend forecast
//!
//! A flat projection of the trailing 3-month mean spend. Confidence labels
//! are fixed by how far ahead the month is, not derived from variance.

use crate::models::Confidence;

use super::trends::mean_spend;
use super::types::{Forecast, ForecastPoint, MonthlyTrendPoint};

/// Months of history averaged for the projection
pub const FORECAST_WINDOW_MONTHS: usize = 3;

/// Months projected past the last observed month
pub const FORECAST_HORIZON_MONTHS: u32 = 3;

/// Project the next three months of spend. `None` with fewer than three
/// months of trend data.
pub fn forecast_spend(trends: &[MonthlyTrendPoint]) -> Option<Forecast> {
    if trends.len() < FORECAST_WINDOW_MONTHS {
        return None;
    }

    let recent = &trends[trends.len() - FORECAST_WINDOW_MONTHS..];
    let expected_spend = mean_spend(recent);
    let last_month = trends.last()?.month;

    let next_three_months = (1..=FORECAST_HORIZON_MONTHS)
        .map(|offset| ForecastPoint {
            month: last_month.plus_months(offset),
            expected_spend,
            confidence: Confidence::for_offset(offset),
        })
        .collect();

    Some(Forecast { next_three_months })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;

    fn point(year: i32, month: u32, spend: f64) -> MonthlyTrendPoint {
        MonthlyTrendPoint {
            month: YearMonth::new(year, month).unwrap(),
            income: 0.0,
            spend,
            net: -spend,
        }
    }

    #[test]
    fn test_no_forecast_below_three_months() {
        assert!(forecast_spend(&[]).is_none());
        assert!(forecast_spend(&[point(2024, 1, 10.0), point(2024, 2, 10.0)]).is_none());
    }

    #[test]
    fn test_uses_trailing_three_months_only() {
        let trends = vec![
            point(2024, 1, 100.0),
            point(2024, 2, 100.0),
            point(2024, 3, 100.0),
            point(2024, 4, 400.0),
        ];
        let forecast = forecast_spend(&trends).unwrap();

        assert_eq!(forecast.next_three_months.len(), 3);
        for p in &forecast.next_three_months {
            assert!((p.expected_spend - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_months_and_confidence_labels() {
        let trends = vec![
            point(2024, 9, 50.0),
            point(2024, 10, 60.0),
            point(2024, 11, 70.0),
        ];
        let forecast = forecast_spend(&trends).unwrap();

        let months: Vec<String> = forecast
            .next_three_months
            .iter()
            .map(|p| p.month.to_string())
            .collect();
        assert_eq!(months, vec!["2024-12", "2025-01", "2025-02"]);

        let labels: Vec<Confidence> = forecast
            .next_three_months
            .iter()
            .map(|p| p.confidence)
            .collect();
        assert_eq!(
            labels,
            vec![Confidence::High, Confidence::Medium, Confidence::Low]
        );
    }

    #[test]
    fn test_projection_follows_last_observed_month_across_gaps() {
        // Trend points skip months; projection starts after the last one
        let trends = vec![
            point(2023, 1, 10.0),
            point(2023, 6, 20.0),
            point(2024, 2, 30.0),
        ];
        let forecast = forecast_spend(&trends).unwrap();
        assert_eq!(forecast.next_three_months[0].month.to_string(), "2024-03");
        assert!((forecast.next_three_months[0].expected_spend - 20.0).abs() < 1e-9);
    }
}
