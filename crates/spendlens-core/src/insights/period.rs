//! Analysis window resolution

use chrono::Datelike;

use crate::models::Transaction;

use super::types::Period;

/// Earliest and latest transaction dates; `None` for an empty slice
pub fn resolve_period(transactions: &[Transaction]) -> Option<Period> {
    let start = transactions.iter().map(|t| t.date).min()?;
    let end = transactions.iter().map(|t| t.date).max()?;
    Some(Period { start, end })
}

/// Calendar months touched by the period, counting both ends (minimum 1)
pub fn months_spanned(period: &Period) -> u32 {
    let months = (period.end.year() - period.start.year()) * 12
        + (period.end.month() as i32 - period.start.month() as i32)
        + 1;
    months.max(1) as u32
}
