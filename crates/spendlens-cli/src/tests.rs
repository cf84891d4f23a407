//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use spendlens_core::generate_insights;
use tempfile::{NamedTempFile, TempDir};

use crate::commands::{self, truncate};

const STATEMENT_CSV: &str = "\
Date,Description,Merchant,Amount,Primary Category,Detailed Category
2024-01-05,CARD PAYMENT NETFLIX,NETFLIX,-9.99,ENTERTAINMENT,ENTERTAINMENT_TV_AND_MOVIES
2024-02-04,CARD PAYMENT NETFLIX,NETFLIX,-9.99,ENTERTAINMENT,ENTERTAINMENT_TV_AND_MOVIES
2024-03-06,CARD PAYMENT NETFLIX,NETFLIX,-9.99,ENTERTAINMENT,ENTERTAINMENT_TV_AND_MOVIES
2024-01-01,RENT,,-850.00,RENT_AND_UTILITIES,RENT_AND_UTILITIES_RENT
2024-02-01,RENT,,-850.00,RENT_AND_UTILITIES,RENT_AND_UTILITIES_RENT
2024-03-01,RENT,,-850.00,RENT_AND_UTILITIES,RENT_AND_UTILITIES_RENT
2024-01-25,SALARY,,2500.00,INCOME,INCOME_WAGES
2024-02-25,SALARY,,2500.00,INCOME,INCOME_WAGES
";

/// Write `content` to a temp file with the given extension
fn temp_input(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze_text() {
    let input = temp_input(STATEMENT_CSV, "csv");
    let result = commands::cmd_analyze(input.path(), None, "text", false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_json() {
    let input = temp_input(STATEMENT_CSV, "csv");
    let result = commands::cmd_analyze(input.path(), None, "JSON", true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_unknown_format() {
    let input = temp_input(STATEMENT_CSV, "csv");
    let result = commands::cmd_analyze(input.path(), None, "xml", false);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unknown format"));
}

#[test]
fn test_cmd_analyze_empty_file_fails() {
    let input = temp_input("[]", "json");
    let result = commands::cmd_analyze(input.path(), None, "text", false);

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<spendlens_core::Error>(),
        Some(spendlens_core::Error::InsufficientData(_))
    ));
}

#[test]
fn test_cmd_analyze_json_empty_file_fails_without_report() {
    let input = temp_input("[]", "json");
    let err = commands::cmd_analyze(input.path(), None, "json", false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<spendlens_core::Error>(),
        Some(spendlens_core::Error::InsufficientData(_))
    ));
}

#[test]
fn test_cmd_analyze_missing_file() {
    let result = commands::cmd_analyze(
        &PathBuf::from("/nonexistent/statement.csv"),
        None,
        "text",
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_unsupported_extension() {
    let input = temp_input(STATEMENT_CSV, "txt");
    let err = commands::cmd_analyze(input.path(), None, "text", false).unwrap_err();
    assert!(err.to_string().contains("Failed to load transactions"));
}

#[test]
fn test_cmd_analyze_custom_taxonomy() {
    let dir = TempDir::new().unwrap();
    let taxonomy = dir.path().join("categories.toml");
    std::fs::write(
        &taxonomy,
        "strict = true\n\n[buckets]\nfixed = [\"RENT_AND_UTILITIES\"]\ndiscretionary = []\n\n\
         [[categories]]\nprimary = \"RENT_AND_UTILITIES\"\ndetailed = [\"RENT_AND_UTILITIES_RENT\"]\n",
    )
    .unwrap();

    let input = temp_input(STATEMENT_CSV, "csv");
    let result = commands::cmd_analyze(input.path(), Some(&taxonomy), "text", false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_bad_taxonomy_path() {
    let input = temp_input(STATEMENT_CSV, "csv");
    let missing = PathBuf::from("/nonexistent/categories.toml");
    let result = commands::cmd_analyze(input.path(), Some(&missing), "text", false);
    assert!(result.is_err());
}

#[test]
fn test_report_json_keys() {
    let transactions = spendlens_core::import::parse_csv(STATEMENT_CSV.as_bytes()).unwrap();
    let insights = generate_insights(&transactions).unwrap();
    let json = commands::report_json(&insights).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["recurringPayments"].as_array().unwrap().len(), 2);
    assert!(value["spending_patterns"].is_object());
    assert_eq!(value["period"]["start"], "2024-01-01");
}

// ========== Recurring Command Tests ==========

#[test]
fn test_cmd_recurring() {
    let input = temp_input(STATEMENT_CSV, "csv");
    assert!(commands::cmd_recurring(input.path()).is_ok());
}

#[test]
fn test_cmd_recurring_none_found() {
    let json = r#"[{"date": "2024-01-01", "amount": -5.0, "merchant": "KIOSK"}]"#;
    let input = temp_input(json, "json");
    assert!(commands::cmd_recurring(input.path()).is_ok());
}

#[test]
fn test_cmd_recurring_empty_file_ok() {
    let input = temp_input("[]", "json");
    assert!(commands::cmd_recurring(input.path()).is_ok());
}

// ========== Categories Command Tests ==========

#[test]
fn test_cmd_categories_with_explicit_file() {
    let dir = TempDir::new().unwrap();
    let taxonomy = dir.path().join("categories.toml");
    std::fs::write(&taxonomy, "[buckets]\nfixed = [\"LOAN_PAYMENTS\"]\n").unwrap();
    assert!(commands::cmd_categories(Some(&taxonomy)).is_ok());
}

#[test]
fn test_cmd_categories_invalid_file() {
    let dir = TempDir::new().unwrap();
    let taxonomy = dir.path().join("categories.toml");
    std::fs::write(&taxonomy, "this is not toml [").unwrap();
    assert!(commands::cmd_categories(Some(&taxonomy)).is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("NETFLIX", 10), "NETFLIX");
    assert_eq!(truncate("ABCDEFGHIJKL", 10), "ABCDEFG...");
    assert_eq!(truncate("CAFÉ CRÈME CORNER", 8), "CAFÉ ...");
}
