// 📈 Stock Registry - validated basic data of every listed stock
//
// Each row of the registry file is checked before it is added:
// - Missing or malformed ISIN → row dropped (it cannot be keyed)
// - Missing name, bad months-in-report, bad expiry date → row kept, flagged
//
// Every failure ends up in RegistryErrors. A bad row never stops the load.

use crate::config::Config;
use crate::eps::string_to_decimal;
use crate::errors::RegistryErrors;
use crate::reader::{read_rows, RawRow};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info};

/// ISINs are always 12 characters
pub const ISIN_LENGTH: usize = 12;

/// Accepted months-in-report codes (0 = no regular report)
pub const VALID_MONTHS_IN_REPORT: [i64; 5] = [0, 3, 6, 9, 12];

// ============================================================================
// STOCK RECORD
// ============================================================================

/// Normalized basic data of one stock, keyed by ISIN in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockRecord {
    pub name: String,
    pub eps: Decimal,
    /// Kept as in the file; see `months_in_report_value`
    pub months_in_report: String,
    /// Kept as in the file, only checked against the date format
    pub report_expiry_date: String,
    pub own_investor_link: String,
    pub stock_exchange_link: String,
}

impl StockRecord {
    /// Months-in-report as a number, if it is one of the accepted codes
    pub fn months_in_report_value(&self) -> Option<u32> {
        parse_months_in_report(&self.months_in_report)
            .filter(|months| VALID_MONTHS_IN_REPORT.contains(months))
            .and_then(|months| u32::try_from(months).ok())
    }
}

/// Empty means 0; anything else must be an integer
fn parse_months_in_report(s: &str) -> Option<i64> {
    if s.is_empty() {
        return Some(0);
    }
    s.trim().parse::<i64>().ok()
}

fn is_valid_date(s: &str, date_format: &str) -> bool {
    has_strict_shape(s, date_format)
        && (NaiveDate::parse_from_str(s, date_format).is_ok()
            || NaiveDateTime::parse_from_str(s, date_format).is_ok())
}

/// Field widths chrono does not enforce: numeric fields are plain digits
/// (no leading blanks or signs) and `%Y` is exactly four of them. A blank in
/// the format matches one or more blanks. Formats with other directives are
/// left to chrono alone.
fn has_strict_shape(s: &str, date_format: &str) -> bool {
    let mut value = s;
    let mut fmt = date_format.chars();

    while let Some(f) = fmt.next() {
        if f == '%' {
            let (min, max) = match fmt.next() {
                Some('Y') => (4, 4),
                Some('y') => (2, 2),
                Some('m' | 'd' | 'H' | 'M' | 'S') => (1, 2),
                Some('%') => match value.strip_prefix('%') {
                    Some(rest) => {
                        value = rest;
                        continue;
                    }
                    None => return false,
                },
                _ => return true,
            };

            let digits = value
                .chars()
                .take(max)
                .take_while(|c| c.is_ascii_digit())
                .count();
            if digits < min {
                return false;
            }
            value = &value[digits..];
        } else if f.is_whitespace() {
            let rest = value.trim_start();
            if rest.len() == value.len() {
                return false;
            }
            value = rest;
        } else {
            match value.strip_prefix(f) {
                Some(rest) => value = rest,
                None => return false,
            }
        }
    }

    value.is_empty()
}

// ============================================================================
// LOAD OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadOutcome {
    /// Stocks loaded, no row had any defect
    Loaded { count: usize },

    /// Stocks loaded, but some rows were dropped or flagged
    LoadedWithErrors { count: usize },

    /// Registry is empty after the load
    NothingLoaded,
}

impl LoadOutcome {
    pub fn count(&self) -> usize {
        match self {
            LoadOutcome::Loaded { count } | LoadOutcome::LoadedWithErrors { count } => *count,
            LoadOutcome::NothingLoaded => 0,
        }
    }

    pub fn message(&self) -> String {
        match self {
            LoadOutcome::Loaded { count } => {
                format!("{} new ISIN loaded. No errors found.", count)
            }
            LoadOutcome::LoadedWithErrors { count } => {
                format!("{} ISIN loaded. The following errors found:", count)
            }
            LoadOutcome::NothingLoaded => "No ISIN loaded.".to_string(),
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Registry - all stocks that passed the ISIN checks, plus the error report
#[derive(Debug, Clone)]
pub struct Registry {
    stocks: BTreeMap<String, StockRecord>,
    errors: RegistryErrors,
    date_format: String,
}

impl Registry {
    /// Empty registry checking expiry dates against `date_format`
    pub fn new(date_format: impl Into<String>) -> Self {
        Registry {
            stocks: BTreeMap::new(),
            errors: RegistryErrors::new(),
            date_format: date_format.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Registry::new(config.date_format.clone())
    }

    /// Read the registry file named in `config` and load its rows
    ///
    /// Only I/O and CSV structure problems are returned as errors. Row level
    /// defects are recorded in `errors()`.
    pub fn load_from_file(&mut self, config: &Config) -> Result<LoadOutcome> {
        info!(
            file = ?config.registry.filename,
            "Registry: Loading basic data from CSV."
        );

        let delimiter = config.registry.delimiter_byte()?;
        let rows = read_rows(&config.registry.filename, delimiter)?;

        Ok(self.load_rows(rows))
    }

    /// Check, convert and add every row. Later rows overwrite earlier rows
    /// with the same ISIN.
    pub fn load_rows<I>(&mut self, rows: I) -> LoadOutcome
    where
        I: IntoIterator<Item = RawRow>,
    {
        for row in rows {
            if self.is_row_addable(&row) {
                let record = self.record_from_row(&row);
                self.stocks.insert(row.isin, record);
            }
        }

        let outcome = if self.stocks.is_empty() {
            LoadOutcome::NothingLoaded
        } else if !self.errors.errors_found {
            LoadOutcome::Loaded {
                count: self.stocks.len(),
            }
        } else {
            LoadOutcome::LoadedWithErrors {
                count: self.stocks.len(),
            }
        };

        self.log_outcome(&outcome);
        outcome
    }

    fn log_outcome(&self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded { .. } => info!("Registry: {}", outcome.message()),
            LoadOutcome::LoadedWithErrors { .. } => {
                error!("Registry: {}", outcome.message());
                for line in self.errors.details() {
                    error!("Registry:   {}", line);
                }
            }
            LoadOutcome::NothingLoaded => error!("Registry: {}", outcome.message()),
        }
    }

    /// Check one row, recording every defect found
    ///
    /// Returns false only for a missing or malformed ISIN. The soft checks
    /// (name, months in report, expiry date) flag the row but keep it.
    pub fn is_row_addable(&mut self, row: &RawRow) -> bool {
        let isin = row.isin.as_str();

        if isin.is_empty() {
            self.errors.record_missing_isin();
            return false;
        } else if isin.chars().count() != ISIN_LENGTH {
            self.errors.record_faulty_isin(isin);
            return false;
        }

        if row.name.is_empty() {
            self.errors.record_missing_name(isin);
        }

        let months_ok = parse_months_in_report(&row.months_in_report)
            .map(|months| VALID_MONTHS_IN_REPORT.contains(&months))
            .unwrap_or(false);
        if !months_ok {
            self.errors.record_faulty_months(isin);
        }

        if !row.report_expiry_date.is_empty()
            && !is_valid_date(&row.report_expiry_date, &self.date_format)
        {
            self.errors.record_faulty_expiry_date(isin);
        }

        true
    }

    /// Typed record of an addable row. Pure: same row, same record.
    pub fn record_from_row(&self, row: &RawRow) -> StockRecord {
        StockRecord {
            name: row.name.clone(),
            eps: string_to_decimal(&row.eps),
            months_in_report: row.months_in_report.clone(),
            report_expiry_date: row.report_expiry_date.clone(),
            own_investor_link: row.own_investor_link.clone(),
            stock_exchange_link: row.stock_exchange_link.clone(),
        }
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn get(&self, isin: &str) -> Option<&StockRecord> {
        self.stocks.get(isin)
    }

    pub fn contains(&self, isin: &str) -> bool {
        self.stocks.contains_key(isin)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Stocks in ISIN order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StockRecord)> {
        self.stocks.iter()
    }

    pub fn isins(&self) -> Vec<String> {
        self.stocks.keys().cloned().collect()
    }

    pub fn errors(&self) -> &RegistryErrors {
        &self.errors
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::from_config(&Config::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
