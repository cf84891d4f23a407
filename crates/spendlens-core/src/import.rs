//! Transaction loading from JSON and bank CSV exports
//!
//! Everything read here is converted into the canonical [`Transaction`]
//! shape before the insights pipeline sees it.

use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{non_blank, Direction, Transaction, TransactionRecord, DEFAULT_CURRENCY};

const DATE_COLUMNS: &[&str] = &["date", "transaction date", "posting date", "trans date"];
const DESCRIPTION_COLUMNS: &[&str] = &[
    "description",
    "transaction description",
    "details",
    "memo",
    "transaction text",
];
const MERCHANT_COLUMNS: &[&str] = &["merchant", "merchant name"];
const PAYMENT_IN_COLUMNS: &[&str] = &["payment in", "credit", "deposit", "amount in", "credits"];
const PAYMENT_OUT_COLUMNS: &[&str] = &[
    "payment out",
    "debit",
    "withdrawal",
    "amount out",
    "debits",
];
const AMOUNT_COLUMNS: &[&str] = &["amount", "transaction amount"];
const PRIMARY_CATEGORY_COLUMNS: &[&str] = &["primary category", "primarycategory", "primary_category"];
const DETAILED_CATEGORY_COLUMNS: &[&str] = &[
    "detailed category",
    "detailedcategory",
    "detailed_category",
];
const CURRENCY_COLUMNS: &[&str] = &["currency", "ccy"];

/// Highest two-digit year still read as 20xx
const SHORT_YEAR_PIVOT: i32 = 50;

/// Load transactions from a file, choosing the parser by extension
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let file = File::open(path)?;
    match extension.as_deref() {
        Some("json") => parse_json(file),
        Some("csv") => parse_csv(file),
        _ => Err(Error::Import(format!(
            "Unsupported file type: {} (expected .json or .csv)",
            path.display()
        ))),
    }
}

/// Parse a JSON array of transaction records.
///
/// Any invalid record fails the whole load.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let records: Vec<TransactionRecord> = serde_json::from_reader(reader)?;
    let total = records.len();

    let transactions = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_transaction()
                .map_err(|e| Error::Import(format!("Record {}: {}", index, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} JSON transaction records", total);
    Ok(transactions)
}

/// Column positions discovered from a CSV header row
#[derive(Debug, Default)]
struct ColumnMap {
    date: Option<usize>,
    description: Option<usize>,
    merchant: Option<usize>,
    payment_in: Option<usize>,
    payment_out: Option<usize>,
    amount: Option<usize>,
    primary_category: Option<usize>,
    detailed_category: Option<usize>,
    currency: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| -> Option<usize> {
            names.iter().find_map(|name| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
            })
        };

        Self {
            date: find(DATE_COLUMNS),
            description: find(DESCRIPTION_COLUMNS),
            merchant: find(MERCHANT_COLUMNS),
            payment_in: find(PAYMENT_IN_COLUMNS),
            payment_out: find(PAYMENT_OUT_COLUMNS),
            amount: find(AMOUNT_COLUMNS),
            primary_category: find(PRIMARY_CATEGORY_COLUMNS),
            detailed_category: find(DETAILED_CATEGORY_COLUMNS),
            currency: find(CURRENCY_COLUMNS),
        }
    }
}

/// Read a non-empty cell
fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a bank CSV export whose columns are discovered from the header row.
///
/// Rows without a date, a description, or any amount are skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers);

    if columns.date.is_none() || columns.description.is_none() {
        return Err(Error::Import(
            "CSV must have a date column and a description column".into(),
        ));
    }

    let mut transactions = Vec::new();
    let mut skipped = 0;

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        match parse_row(&record, &columns) {
            Ok(Some(tx)) => transactions.push(tx),
            Ok(None) => {
                warn!(
                    "Skipping CSV row {}: missing date, description or amount",
                    line + 2
                );
                skipped += 1;
            }
            Err(e) => {
                warn!("Skipping CSV row {}: {}", line + 2, e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Parsed {} CSV transactions ({} rows skipped)",
        transactions.len(),
        skipped
    );
    Ok(transactions)
}

fn parse_row(record: &StringRecord, columns: &ColumnMap) -> Result<Option<Transaction>> {
    let (Some(date_str), Some(description)) = (
        cell(record, columns.date),
        cell(record, columns.description),
    ) else {
        return Ok(None);
    };

    let date = parse_date(date_str)?;

    let payment_in = cell(record, columns.payment_in).map(parse_amount).transpose()?;
    let payment_out = cell(record, columns.payment_out)
        .map(parse_amount)
        .transpose()?;
    let amount = cell(record, columns.amount).map(parse_amount).transpose()?;

    let (direction, magnitude) = match (payment_in, payment_out, amount) {
        (Some(paid_in), _, _) if paid_in.abs() > 0.0 => (Direction::Income, paid_in.abs()),
        (_, Some(paid_out), _) => (Direction::Expense, paid_out.abs()),
        (Some(_), None, None) => (Direction::Income, 0.0),
        (_, None, Some(amount)) if amount > 0.0 => (Direction::Income, amount),
        (_, None, Some(amount)) => (Direction::Expense, amount.abs()),
        (None, None, None) => return Ok(None),
    };

    Ok(Some(Transaction {
        date,
        direction,
        amount: magnitude,
        primary_category: non_blank(cell(record, columns.primary_category).map(String::from)),
        detailed_category: non_blank(cell(record, columns.detailed_category).map(String::from)),
        merchant: non_blank(cell(record, columns.merchant).map(String::from)),
        description: description.to_string(),
        currency: cell(record, columns.currency)
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string(),
    }))
}

/// Parse a date string in any of the accepted statement formats
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // chrono's %Y happily reads "24" as year 24, so short years get their own formats
    let mut parts = s.split(['/', '-']);
    let first_len = parts.next().map_or(0, str::len);
    let last_len = parts.last().map_or(0, str::len);
    let short_year = last_len == 2 && first_len != 4;

    let formats: &[&str] = if short_year {
        &[
            "%d/%m/%y", // 15/01/24
            "%d-%m-%y", // 15-01-24
        ]
    } else {
        &[
            "%Y-%m-%d", // 2024-01-15
            "%Y/%m/%d", // 2024/01/15
            "%d/%m/%Y", // 15/01/2024
            "%d-%m-%Y", // 15-01-2024
        ]
    };

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return if short_year {
                with_statement_century(date)
            } else {
                Ok(date)
            };
        }
    }

    Err(Error::InvalidData(format!("Unable to parse date: {}", s)))
}

/// Two-digit years above 50 are 19xx, the rest 20xx. chrono's own pivot is 69.
fn with_statement_century(date: NaiveDate) -> Result<NaiveDate> {
    let yy = date.year().rem_euclid(100);
    let year = if yy > SHORT_YEAR_PIVOT { 1900 + yy } else { 2000 + yy };

    date.with_year(year)
        .ok_or_else(|| Error::InvalidData(format!("Invalid date: {}", date)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '€', '£', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))?;

    if !amount.is_finite() {
        return Err(Error::Import(format!("Unable to parse amount: {}", s)));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(
            parse_date("15/01/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(
            parse_date("2024/01/15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(
            parse_date("15/01/24").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("January 15").is_err());
    }

    #[test]
    fn test_parse_date_short_year_century() {
        let cases = [
            ("15/01/50", 2050),
            ("15/01/51", 1951),
            ("15/01/55", 1955),
            ("15-01-68", 1968),
            ("15-01-69", 1969),
            ("15/01/00", 2000),
            ("29/02/56", 1956),
        ];
        for (input, year) in cases {
            assert_eq!(parse_date(input).unwrap().year(), year, "{}", input);
        }
    }

    #[test]
    fn test_parse_csv_short_year_dates() {
        let csv = "Date,Description,Amount\n15/01/55,OLD,-1.00\n15/01/24,NEW,-2.00";
        let txs = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(1955, 1, 15).unwrap());
        assert_eq!(txs[1].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("€ 12.00").unwrap(), 12.0);
        assert_eq!(parse_amount("(50.00)").unwrap(), -50.0);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_parse_csv_signed_amount_column() {
        let csv = "Date,Description,Amount,Merchant,Primary Category,Detailed Category
2024-01-05,NETFLIX.COM 866-579,-9.99,NETFLIX,ENTERTAINMENT,ENTERTAINMENT_TV_AND_MOVIES
2024-01-25,ACME PAYROLL,2500.00,,INCOME,INCOME_WAGES
";
        let txs = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);

        assert!(txs[0].is_expense());
        assert_eq!(txs[0].amount, 9.99);
        assert_eq!(txs[0].merchant.as_deref(), Some("NETFLIX"));
        assert_eq!(
            txs[0].categories(),
            Some(("ENTERTAINMENT", "ENTERTAINMENT_TV_AND_MOVIES"))
        );

        assert!(txs[1].is_income());
        assert_eq!(txs[1].amount, 2500.0);
        assert!(txs[1].merchant.is_none());
    }

    #[test]
    fn test_parse_csv_payment_in_out_columns() {
        let csv = "Transaction Date,Details,Payment In,Payment Out,Balance
01/02/2024,CARD PAYMENT TO TESCO,,42.10,1000.00
02/02/2024,TRANSFER FROM SAVINGS,100.00,,1100.00
";
        let txs = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(txs[0].is_expense());
        assert_eq!(txs[0].amount, 42.10);
        assert!(txs[1].is_income());
        assert_eq!(txs[1].amount, 100.0);
    }

    #[test]
    fn test_parse_csv_skips_incomplete_rows() {
        let csv = "Date,Description,Amount
2024-01-05,COFFEE,-3.50
,MISSING DATE,-1.00
2024-01-06,,-1.00
2024-01-07,NO AMOUNT,
bad-date,BAD DATE,-2.00
";
        let txs = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "COFFEE");
    }

    #[test]
    fn test_parse_csv_requires_date_and_description() {
        let csv = "Amount,Balance\n-1.00,10.00\n";
        assert!(matches!(parse_csv(csv.as_bytes()), Err(Error::Import(_))));
    }

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            {"date":"2024-01-05","amount":-9.99,"isIncome":false,"merchant":"NETFLIX","rawDescription":"NETFLIX.COM","primaryCategory":"ENTERTAINMENT","detailedCategory":"ENTERTAINMENT_TV_AND_MOVIES","currency":"GBP"},
            {"date":"2024-01-25","payment_in":2500,"payment_out":0,"transaction_text":"SALARY"}
        ]"#;
        let txs = parse_json(json.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].currency, "GBP");
        assert!(txs[1].is_income());
    }

    #[test]
    fn test_parse_json_reports_bad_record_index() {
        let json = r#"[{"date":"2024-01-05","amount":-1},{"date":"nope","amount":-1}]"#;
        match parse_json(json.as_bytes()) {
            Err(Error::Import(msg)) => assert!(msg.starts_with("Record 1")),
            other => panic!("expected import error, got {:?}", other),
        }
    }
}
