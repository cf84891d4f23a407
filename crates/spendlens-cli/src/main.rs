//! SpendLens CLI - Behavioral spending insights
//!
//! Usage:
//!   spendlens analyze --file statement.csv     Full insights report
//!   spendlens recurring --file statement.json  Recurring payments only
//!   spendlens categories                       Show the category taxonomy

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            format,
            strict,
        } => commands::cmd_analyze(&file, cli.taxonomy.as_deref(), &format, strict),
        Commands::Recurring { file } => commands::cmd_recurring(&file),
        Commands::Categories => commands::cmd_categories(cli.taxonomy.as_deref()),
    }
}
