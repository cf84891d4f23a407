//! Recurring payment command

use std::path::Path;

use anyhow::Result;
use spendlens_core::insights::{detect_recurring_payments, RecurringPayment};
use spendlens_core::Frequency;

use super::{load_file, truncate};

pub fn cmd_recurring(file: &Path) -> Result<()> {
    let transactions = load_file(file)?;
    let recurring = detect_recurring_payments(&transactions);

    if recurring.is_empty() {
        println!("No recurring payments found in {}", file.display());
        return Ok(());
    }

    println!();
    print_recurring_table(&recurring);
    Ok(())
}

pub fn print_recurring_table(recurring: &[RecurringPayment]) {
    println!("🔁 Recurring Payments");
    println!("   ─────────────────────────────────────────────────────────────");

    for payment in recurring {
        println!(
            "   {:30} │ {:>8.2}/{:<7} │ {}",
            truncate(&payment.merchant, 30),
            payment.amount,
            payment.frequency.as_str(),
            payment.category
        );
    }

    let monthly_total: f64 = recurring
        .iter()
        .filter(|p| p.frequency == Frequency::Monthly)
        .map(|p| p.amount)
        .sum();
    if monthly_total > 0.0 {
        println!("   Monthly total: {:.2}", monthly_total);
    }
}
