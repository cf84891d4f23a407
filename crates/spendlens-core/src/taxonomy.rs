//! Category taxonomy for aggregation and spending classification
//!
//! Holds the known (primary, detailed) category pairs and the allowlists that
//! map primary categories onto fixed / discretionary spend. Everything else is
//! variable.
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (`--taxonomy`) when given
//! 2. Override in data dir (~/.local/share/spendlens/config/categories.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! A taxonomy is loaded once and shared read-only (typically behind an `Arc`).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/categories.toml");

/// Primary categories that are committed, recurring costs
pub const FIXED_CATEGORIES: &[&str] = &["RENT_AND_UTILITIES", "LOAN_PAYMENTS", "INSURANCE"];

/// Primary categories that are optional spend
pub const DISCRETIONARY_CATEGORIES: &[&str] = &["ENTERTAINMENT", "SHOPPING", "TRAVEL", "DINING"];

/// Spending pattern bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingBucket {
    Fixed,
    Variable,
    Discretionary,
}

impl SpendingBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
            Self::Discretionary => "discretionary",
        }
    }
}

impl fmt::Display for SpendingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only category lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTaxonomy {
    /// primary -> detailed categories
    pairs: BTreeMap<String, BTreeSet<String>>,
    fixed: BTreeSet<String>,
    discretionary: BTreeSet<String>,
    /// Only known pairs take part in the category breakdown
    strict: bool,
}

impl Default for CategoryTaxonomy {
    /// Built-in bucket allowlists, no pair list, lenient
    fn default() -> Self {
        Self {
            pairs: BTreeMap::new(),
            fixed: FIXED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            discretionary: DISCRETIONARY_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            strict: false,
        }
    }
}

impl CategoryTaxonomy {
    /// The taxonomy embedded in the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Resolve and load a taxonomy: explicit path, then data dir override,
    /// then the embedded default
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                debug!("Loading taxonomy override from {}", path.display());
                return Self::from_path(&path);
            }
        }

        Self::embedded()
    }

    /// Load a taxonomy file; the file must exist
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Taxonomy(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawTaxonomy = toml::from_str(content)?;

        let fixed = normalize_set(raw.buckets.fixed);
        let discretionary = normalize_set(raw.buckets.discretionary);

        if let Some(both) = fixed.intersection(&discretionary).next() {
            return Err(Error::Taxonomy(format!(
                "{} is listed as both fixed and discretionary",
                both
            )));
        }

        let mut pairs: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for entry in raw.categories {
            let primary = entry.primary.trim().to_string();
            if primary.is_empty() {
                return Err(Error::Taxonomy("Category with empty primary name".into()));
            }
            pairs
                .entry(primary)
                .or_default()
                .extend(normalize_set(entry.detailed));
        }

        Ok(Self {
            pairs,
            fixed,
            discretionary,
            strict: raw.strict,
        })
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Bucket for a primary category; uncategorized spend is variable
    pub fn bucket_for(&self, primary: Option<&str>) -> SpendingBucket {
        match primary {
            Some(p) if self.fixed.contains(p) => SpendingBucket::Fixed,
            Some(p) if self.discretionary.contains(p) => SpendingBucket::Discretionary,
            _ => SpendingBucket::Variable,
        }
    }

    pub fn is_known_pair(&self, primary: &str, detailed: &str) -> bool {
        self.pairs
            .get(primary)
            .is_some_and(|details| details.contains(detailed))
    }

    /// Whether a categorized transaction may appear in the category breakdown
    pub fn accepts(&self, primary: &str, detailed: &str) -> bool {
        !self.strict || self.is_known_pair(primary, detailed)
    }

    pub fn primary_categories(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.values().map(BTreeSet::len).sum()
    }

    pub fn fixed_categories(&self) -> impl Iterator<Item = &str> {
        self.fixed.iter().map(String::as_str)
    }

    pub fn discretionary_categories(&self) -> impl Iterator<Item = &str> {
        self.discretionary.iter().map(String::as_str)
    }
}

/// Default override location for the taxonomy file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendlens").join("config").join("categories.toml"))
}

fn normalize_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawTaxonomy {
    #[serde(default)]
    strict: bool,
    #[serde(default)]
    buckets: RawBuckets,
    #[serde(default)]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawBuckets {
    #[serde(default)]
    fixed: Vec<String>,
    #[serde(default)]
    discretionary: Vec<String>,
}

impl Default for RawBuckets {
    fn default() -> Self {
        Self {
            fixed: FIXED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            discretionary: DISCRETIONARY_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    primary: String,
    #[serde(default)]
    detailed: Vec<String>,
}
