//! Month-over-month income and spend

use std::collections::BTreeMap;

use crate::models::{Direction, Transaction, YearMonth};

use super::types::MonthlyTrendPoint;

/// Bucket transactions by calendar month, ascending. Months without
/// transactions are not filled in.
pub fn build_monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyTrendPoint> {
    let mut by_month: BTreeMap<YearMonth, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let (income, spend) = by_month
            .entry(YearMonth::from_date(tx.date))
            .or_insert((0.0, 0.0));
        match tx.direction {
            Direction::Income => *income += tx.amount,
            Direction::Expense => *spend += tx.amount,
        }
    }

    by_month
        .into_iter()
        .map(|(month, (income, spend))| MonthlyTrendPoint {
            month,
            income,
            spend,
            net: income - spend,
        })
        .collect()
}

/// Mean spend across the given points; 0 for none
pub(crate) fn mean_spend(points: &[MonthlyTrendPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.spend).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_buckets_sorted_with_net() {
        let txs = vec![
            Transaction::expense(date(2024, 3, 2), 40.0, "C"),
            Transaction::income(date(2024, 1, 25), 1000.0, "SALARY"),
            Transaction::expense(date(2024, 1, 3), 250.0, "A"),
            Transaction::expense(date(2023, 12, 30), 10.0, "B"),
            Transaction::expense(date(2024, 1, 31), 50.0, "D"),
        ];
        let trends = build_monthly_trends(&txs);

        let months: Vec<String> = trends.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);

        let jan = &trends[1];
        assert_eq!(jan.income, 1000.0);
        assert_eq!(jan.spend, 300.0);
        assert_eq!(jan.net, 700.0);
        assert_eq!(trends[2].net, -40.0);
    }

    #[test]
    fn test_gap_months_not_interpolated() {
        let txs = vec![
            Transaction::expense(date(2024, 1, 1), 1.0, "A"),
            Transaction::expense(date(2024, 6, 1), 1.0, "A"),
        ];
        assert_eq!(build_monthly_trends(&txs).len(), 2);
    }

    #[test]
    fn test_mean_spend() {
        let txs = vec![
            Transaction::expense(date(2024, 1, 1), 100.0, "A"),
            Transaction::expense(date(2024, 2, 1), 300.0, "A"),
        ];
        let trends = build_monthly_trends(&txs);
        assert_eq!(mean_spend(&trends), 200.0);
        assert_eq!(mean_spend(&[]), 0.0);
    }
}
