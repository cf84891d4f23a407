//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SpendLens - Understand how you spend
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Behavioral insights from your transaction history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Category taxonomy file (TOML)
    ///
    /// Defaults to the user config under the local data directory, falling
    /// back to the built-in Plaid-style taxonomy.
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the full insights report for a transaction file
    Analyze {
        /// Transactions file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Only count category pairs the taxonomy knows about
        #[arg(long)]
        strict: bool,
    },

    /// List recurring payments found in a transaction file
    Recurring {
        /// Transactions file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the effective category taxonomy
    Categories,
}
