//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Full insights report (text or JSON)
//! - `recurring` - Recurring payment table
//! - `categories` - Taxonomy buckets and pair count

pub mod analyze;
pub mod categories;
pub mod recurring;

// Re-export command functions for main.rs
pub use analyze::*;
pub use categories::*;
pub use recurring::*;

use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::{load_transactions, Transaction};
use tracing::info;

/// Load a transaction file, naming it in any error
pub fn load_file(file: &Path) -> Result<Vec<Transaction>> {
    let transactions = load_transactions(file)
        .with_context(|| format!("Failed to load transactions from {}", file.display()))?;
    info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        file.display()
    );
    Ok(transactions)
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
