//! Taxonomy inspection command

use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::taxonomy::default_config_path;
use spendlens_core::CategoryTaxonomy;

pub fn cmd_categories(taxonomy: Option<&Path>) -> Result<()> {
    let source = match taxonomy {
        Some(path) => path.display().to_string(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path.display().to_string(),
            None => "built-in".to_string(),
        },
    };
    let taxonomy = CategoryTaxonomy::load(taxonomy).context("Failed to load taxonomy")?;

    println!();
    println!("🏷️  Category Taxonomy ({})", source);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Mode: {}",
        if taxonomy.is_strict() { "strict" } else { "lenient" }
    );
    println!("   Known category pairs: {}", taxonomy.pair_count());
    println!();
    println!(
        "   Fixed:          {}",
        taxonomy.fixed_categories().collect::<Vec<_>>().join(", ")
    );
    println!(
        "   Discretionary:  {}",
        taxonomy.discretionary_categories().collect::<Vec<_>>().join(", ")
    );
    println!("   Variable:       everything else");

    let primaries: Vec<&str> = taxonomy.primary_categories().collect();
    if !primaries.is_empty() {
        println!();
        println!("   Primary categories:");
        for primary in primaries {
            println!("     {:28} {}", primary, taxonomy.bucket_for(Some(primary)).as_str());
        }
    }

    Ok(())
}
