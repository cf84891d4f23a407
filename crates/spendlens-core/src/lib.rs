//! SpendLens Core Library
//!
//! Shared functionality for the SpendLens spending analyzer:
//! - Transaction model and JSON/CSV import
//! - Category taxonomy and spending buckets
//! - Behavioral insights pipeline (trends, recurring payments, forecast)

pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod taxonomy;

pub use error::{Error, Result};
pub use import::load_transactions;
pub use insights::{generate_insights, BehavioralInsights, InsightEngine};
pub use models::{Direction, Frequency, Transaction, TransactionRecord, YearMonth};
pub use taxonomy::{CategoryTaxonomy, SpendingBucket};
