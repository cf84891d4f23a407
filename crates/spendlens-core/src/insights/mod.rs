//! Behavioral Insights - what a transaction history says about spending
//!
//! Every stage is a pure function over an in-memory transaction list. The
//! engine runs them in order and assembles a single report:
//!
//! - **Period** - first and last transaction date
//! - **Categories** - spend per primary and detailed category
//! - **Trends** - income, spend and net per calendar month
//! - **Recurring** - subscriptions and other regular payments
//! - **Patterns** - fixed / variable / discretionary split
//! - **Forecast** - next three months of expected spend
//! - **Narrator** - short human-readable statements
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendlens_core::import::load_transactions;
//! use spendlens_core::insights::generate_insights;
//!
//! let transactions = load_transactions(Path::new("statement.csv"))?;
//! let insights = generate_insights(&transactions)?;
//! ```

pub mod categories;
pub mod engine;
pub mod forecast;
pub mod narrator;
pub mod patterns;
pub mod period;
pub mod recurring;
pub mod trends;
pub mod types;

pub use engine::{generate_insights, InsightEngine};
pub use recurring::detect_recurring_payments;
pub use types::{
    BehavioralInsights, CategoryBreakdownEntry, DetailedCategorySpend, Forecast, ForecastPoint,
    MonthlyTrendPoint, Period, RecurringPayment, SpendingPatterns, Summary,
};
