//! Insights report command

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use spendlens_core::insights::BehavioralInsights;
use spendlens_core::{CategoryTaxonomy, Error, InsightEngine};

use super::{load_file, print_recurring_table, truncate};

pub fn cmd_analyze(file: &Path, taxonomy: Option<&Path>, format: &str, strict: bool) -> Result<()> {
    let format = format.to_lowercase();
    if format != "text" && format != "json" {
        anyhow::bail!("Unknown format: {}. Available: text, json", format);
    }

    let mut taxonomy = CategoryTaxonomy::load(taxonomy).context("Failed to load taxonomy")?;
    if strict {
        taxonomy = taxonomy.with_strict(true);
    }

    let transactions = load_file(file)?;
    let engine = InsightEngine::new(Arc::new(taxonomy));

    let insights = match engine.generate(&transactions) {
        Err(e @ Error::InsufficientData(_)) => {
            eprintln!("No transactions found in {}", file.display());
            return Err(e.into());
        }
        other => other?,
    };

    if format == "json" {
        println!("{}", report_json(&insights)?);
    } else {
        print_report(&insights);
    }

    Ok(())
}

/// Pretty JSON rendering of the full report
pub fn report_json(insights: &BehavioralInsights) -> Result<String> {
    serde_json::to_string_pretty(insights).context("Failed to serialize insights")
}

pub fn print_report(insights: &BehavioralInsights) {
    let summary = &insights.summary;

    println!();
    println!("📊 Spending Insights");
    println!(
        "   Period: {} to {}",
        insights.period.start, insights.period.end
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:            {:>10.2}", summary.total_income);
    println!("   Spend:             {:>10.2}", summary.total_spend);
    println!("   Savings rate:      {:>9.1}%", summary.savings_rate);
    println!("   Avg monthly in:    {:>10.2}", summary.avg_monthly_income);
    println!("   Avg monthly out:   {:>10.2}", summary.avg_monthly_spend);

    if !insights.category_breakdown.is_empty() {
        println!();
        println!("🏷️  Categories");
        println!(
            "   {:32} │ {:>10} │ {:>6} │ {:>5}",
            "Category", "Amount", "%", "Count"
        );
        println!("   ─────────────────────────────────┼────────────┼────────┼───────");
        for entry in &insights.category_breakdown {
            let count: usize = entry
                .detailed_breakdown
                .iter()
                .map(|d| d.transaction_count)
                .sum();
            println!(
                "   {:32} │ {:>10.2} │ {:>5.1}% │ {:>5}",
                truncate(&entry.primary_category, 32),
                entry.total_amount,
                entry.percentage,
                count
            );
            for detailed in &entry.detailed_breakdown {
                println!(
                    "   {:32} │ {:>10.2} │ {:>6} │ {:>5}",
                    format!("  {}", truncate(&detailed.detailed_category, 30)),
                    detailed.amount,
                    "",
                    detailed.transaction_count
                );
            }
        }
    }

    if !insights.monthly_trends.is_empty() {
        println!();
        println!("📈 Monthly Trends");
        println!(
            "   {:7} │ {:>10} │ {:>10} │ {:>10}",
            "Month", "Income", "Spend", "Net"
        );
        println!("   ────────┼────────────┼────────────┼────────────");
        for point in &insights.monthly_trends {
            println!(
                "   {:7} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
                point.month.to_string(),
                point.income,
                point.spend,
                point.net
            );
        }
    }

    if !insights.recurring_payments.is_empty() {
        println!();
        print_recurring_table(&insights.recurring_payments);
    }

    let patterns = &insights.spending_patterns;
    println!();
    println!("🧭 Spending Patterns");
    println!("   Fixed:             {:>10.2}", patterns.fixed);
    println!("   Variable:          {:>10.2}", patterns.variable);
    println!("   Discretionary:     {:>10.2}", patterns.discretionary);

    match &insights.forecast {
        Some(forecast) => {
            println!();
            println!("🔮 Forecast");
            for point in &forecast.next_three_months {
                println!(
                    "   {} │ {:>10.2} │ {}",
                    point.month,
                    point.expected_spend,
                    point.confidence.as_str()
                );
            }
        }
        None => {
            println!();
            println!("🔮 Forecast: needs at least 3 months of history");
        }
    }

    if !insights.insights.is_empty() {
        println!();
        println!("💡 Insights");
        for statement in &insights.insights {
            println!("   • {}", statement);
        }
    }
    println!();
}
