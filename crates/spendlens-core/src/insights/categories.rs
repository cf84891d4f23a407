//! Category breakdown of spending
//!
//! Only expenses carrying both a primary and a detailed label are broken
//! down. Percentages are taken against total spend across *all* expenses, so
//! with partial categorization coverage the shares add up to less than 100.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::Transaction;
use crate::taxonomy::CategoryTaxonomy;

use super::types::{CategoryBreakdownEntry, DetailedCategorySpend};

#[derive(Default)]
struct PrimaryTotals<'a> {
    total: f64,
    detailed: HashMap<&'a str, (f64, usize)>,
}

/// Group expense spend by primary and detailed category
pub fn build_category_breakdown(
    transactions: &[Transaction],
    total_spend: f64,
    taxonomy: &CategoryTaxonomy,
) -> Vec<CategoryBreakdownEntry> {
    let mut by_primary: HashMap<&str, PrimaryTotals> = HashMap::new();

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let Some((primary, detailed)) = tx.categories() else {
            continue;
        };
        if !taxonomy.accepts(primary, detailed) {
            continue;
        }

        let totals = by_primary.entry(primary).or_default();
        totals.total += tx.amount;

        let (amount, count) = totals.detailed.entry(detailed).or_insert((0.0, 0));
        *amount += tx.amount;
        *count += 1;
    }

    let mut breakdown: Vec<CategoryBreakdownEntry> = by_primary
        .into_iter()
        .map(|(primary, totals)| {
            let mut detailed_breakdown: Vec<DetailedCategorySpend> = totals
                .detailed
                .into_iter()
                .map(|(detailed, (amount, count))| DetailedCategorySpend {
                    detailed_category: detailed.to_string(),
                    amount,
                    transaction_count: count,
                })
                .collect();
            detailed_breakdown.sort_by(|a, b| {
                by_amount_desc(a.amount, b.amount)
                    .then_with(|| a.detailed_category.cmp(&b.detailed_category))
            });

            CategoryBreakdownEntry {
                primary_category: primary.to_string(),
                total_amount: totals.total,
                percentage: percentage_of(totals.total, total_spend),
                detailed_breakdown,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        by_amount_desc(a.total_amount, b.total_amount)
            .then_with(|| a.primary_category.cmp(&b.primary_category))
    });

    breakdown
}

/// `part / whole * 100`, or 0 when there is nothing to divide by
pub(crate) fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

pub(crate) fn by_amount_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
