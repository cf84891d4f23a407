//! Fixed / variable / discretionary split of spending

use crate::models::Transaction;
use crate::taxonomy::{CategoryTaxonomy, SpendingBucket};

use super::types::SpendingPatterns;

/// Put every expense into exactly one bucket by its primary category
pub fn classify_spending(
    transactions: &[Transaction],
    taxonomy: &CategoryTaxonomy,
) -> SpendingPatterns {
    let mut patterns = SpendingPatterns::default();

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        match taxonomy.bucket_for(tx.primary_category.as_deref()) {
            SpendingBucket::Fixed => patterns.fixed += tx.amount,
            SpendingBucket::Variable => patterns.variable += tx.amount,
            SpendingBucket::Discretionary => patterns.discretionary += tx.amount,
        }
    }

    patterns
}
