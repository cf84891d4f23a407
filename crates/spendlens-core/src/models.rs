//! Data models for spendlens

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::import::parse_date;

/// Number of description characters used as a counterparty key when no
/// merchant is known
pub const COUNTERPARTY_PREFIX_CHARS: usize = 30;

/// Currency assumed when a record does not carry one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A categorized transaction, as consumed by the insights pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub direction: Direction,
    /// Always non-negative; the sign lives in `direction`
    pub amount: f64,
    pub primary_category: Option<String>,
    pub detailed_category: Option<String>,
    /// Normalized merchant name from the categorization step
    pub merchant: Option<String>,
    /// Raw statement description
    pub description: String,
    pub currency: String,
}

impl Transaction {
    /// Create an expense with no category or merchant
    pub fn expense(date: NaiveDate, amount: f64, description: impl Into<String>) -> Self {
        Self::new(date, Direction::Expense, amount, description)
    }

    /// Create an income transaction with no category or merchant
    pub fn income(date: NaiveDate, amount: f64, description: impl Into<String>) -> Self {
        Self::new(date, Direction::Income, amount, description)
    }

    fn new(
        date: NaiveDate,
        direction: Direction,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            direction,
            amount: amount.abs(),
            primary_category: None,
            detailed_category: None,
            merchant: None,
            description: description.into(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Attach primary and detailed category labels
    pub fn with_category(mut self, primary: impl Into<String>, detailed: impl Into<String>) -> Self {
        self.primary_category = non_blank(Some(primary.into()));
        self.detailed_category = non_blank(Some(detailed.into()));
        self
    }

    /// Attach only a primary category label
    pub fn with_primary_category(mut self, primary: impl Into<String>) -> Self {
        self.primary_category = non_blank(Some(primary.into()));
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = non_blank(Some(merchant.into()));
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }

    /// Key used to group transactions paid to the same party.
    ///
    /// The merchant when known, otherwise a prefix of the raw description.
    pub fn counterparty(&self) -> String {
        match &self.merchant {
            Some(merchant) => merchant.clone(),
            None => self
                .description
                .chars()
                .take(COUNTERPARTY_PREFIX_CHARS)
                .collect(),
        }
    }

    /// Both category labels, when the transaction is fully categorized
    pub fn categories(&self) -> Option<(&str, &str)> {
        match (&self.primary_category, &self.detailed_category) {
            (Some(primary), Some(detailed)) => Some((primary.as_str(), detailed.as_str())),
            _ => None,
        }
    }
}

/// A transaction as handed over by upstream collaborators.
///
/// Accepts both historical shapes: an `isIncome` flag with an `amount`, or
/// separate `payment_in`/`payment_out` magnitudes. A lone signed `amount`
/// is read as income when positive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub date: String,
    pub amount: Option<f64>,
    pub is_income: Option<bool>,
    #[serde(alias = "payment_in")]
    pub payment_in: Option<f64>,
    #[serde(alias = "payment_out")]
    pub payment_out: Option<f64>,
    pub primary_category: Option<String>,
    pub detailed_category: Option<String>,
    pub merchant: Option<String>,
    #[serde(alias = "transaction_text", alias = "description")]
    pub raw_description: Option<String>,
    pub currency: Option<String>,
}

impl TransactionRecord {
    /// Unify the record into the canonical direction + magnitude form
    pub fn into_transaction(self) -> Result<Transaction> {
        let date = parse_date(&self.date)?;
        let (direction, amount) = self.direction_and_amount()?;

        if !amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Non-finite amount for transaction on {}",
                self.date
            )));
        }

        let merchant = non_blank(self.merchant);
        let description = non_blank(self.raw_description)
            .or_else(|| merchant.clone())
            .unwrap_or_default();

        Ok(Transaction {
            date,
            direction,
            amount,
            primary_category: non_blank(self.primary_category),
            detailed_category: non_blank(self.detailed_category),
            merchant,
            description,
            currency: non_blank(self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }

    fn direction_and_amount(&self) -> Result<(Direction, f64)> {
        if self.payment_in.is_some() || self.payment_out.is_some() {
            let paid_in = self.payment_in.unwrap_or(0.0).abs();
            let paid_out = self.payment_out.unwrap_or(0.0).abs();
            return Ok(if paid_in > 0.0 {
                (Direction::Income, paid_in)
            } else {
                (Direction::Expense, paid_out)
            });
        }

        let amount = self.amount.ok_or_else(|| {
            Error::InvalidData(format!(
                "Transaction on {} has no amount information",
                self.date
            ))
        })?;

        let direction = match self.is_income {
            Some(true) => Direction::Income,
            Some(false) => Direction::Expense,
            None if amount > 0.0 => Direction::Income,
            None => Direction::Expense,
        };

        Ok((direction, amount.abs()))
    }
}

/// Trim a label and drop it when nothing is left
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Recurring payment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confidence attached to a forecast month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Label for a month `offset` months past the last observed one
    pub fn for_offset(offset: u32) -> Self {
        match offset {
            0 | 1 => Self::High,
            2 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar month, serialized as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("Invalid month: {}", month)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month `n` months after this one
    pub fn plus_months(&self, n: u32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + n as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::InvalidData(format!("Invalid month key: {}", s)))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| Error::InvalidData(format!("Invalid month key: {}", s)))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| Error::InvalidData(format!("Invalid month key: {}", s)))?;
        Self::new(year, month)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
