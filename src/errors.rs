// 🧾 Registry Errors - every validation failure of one registry load
//
// Rows are never aborted on a defect. Each failure is recorded here as data
// and handed back to the caller once the batch is done.

use serde::Serialize;
use std::collections::BTreeSet;

// ============================================================================
// ERROR REPORT
// ============================================================================

/// Aggregated validation failures of a registry load.
///
/// Identifiers are kept in sets, so the same ISIN failing the same check
/// twice is recorded once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryErrors {
    /// True once any of the categories below has been hit
    pub errors_found: bool,

    /// Rows with an empty ISIN (they cannot be keyed, so only counted)
    pub missing_isin_count: usize,

    /// ISINs that are not exactly 12 characters long
    pub faulty_isins: BTreeSet<String>,

    /// ISINs whose row has no name
    pub missing_names: BTreeSet<String>,

    /// ISINs with a months-in-report code outside 0, 3, 6, 9, 12
    pub faulty_months_in_report: BTreeSet<String>,

    /// ISINs whose report expiry date does not match the date format
    pub faulty_report_expiry_dates: BTreeSet<String>,
}

impl RegistryErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_missing_isin(&mut self) {
        self.errors_found = true;
        self.missing_isin_count += 1;
    }

    pub fn record_faulty_isin(&mut self, isin: &str) {
        self.errors_found = true;
        self.faulty_isins.insert(isin.to_string());
    }

    pub fn record_missing_name(&mut self, isin: &str) {
        self.errors_found = true;
        self.missing_names.insert(isin.to_string());
    }

    pub fn record_faulty_months(&mut self, isin: &str) {
        self.errors_found = true;
        self.faulty_months_in_report.insert(isin.to_string());
    }

    pub fn record_faulty_expiry_date(&mut self, isin: &str) {
        self.errors_found = true;
        self.faulty_report_expiry_dates.insert(isin.to_string());
    }

    /// Number of distinct problems recorded across all categories
    pub fn total_issues(&self) -> usize {
        self.missing_isin_count
            + self.faulty_isins.len()
            + self.missing_names.len()
            + self.faulty_months_in_report.len()
            + self.faulty_report_expiry_dates.len()
    }

    pub fn summary(&self) -> String {
        if !self.errors_found {
            return "No errors found".to_string();
        }

        format!(
            "{} issues: {} missing ISINs, {} faulty ISINs, {} missing names, {} faulty months in report, {} faulty report expiry dates",
            self.total_issues(),
            self.missing_isin_count,
            self.faulty_isins.len(),
            self.missing_names.len(),
            self.faulty_months_in_report.len(),
            self.faulty_report_expiry_dates.len()
        )
    }

    /// One line per non-empty category, ISINs in sorted order
    pub fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.missing_isin_count > 0 {
            lines.push(format!("Number of missing ISINs: {}", self.missing_isin_count));
        }

        let categories = [
            ("Faulty ISINs", &self.faulty_isins),
            ("Missing names", &self.missing_names),
            ("Faulty months in report", &self.faulty_months_in_report),
            ("Faulty report expiry dates", &self.faulty_report_expiry_dates),
        ];

        for (label, isins) in categories {
            if !isins.is_empty() {
                let joined: Vec<&str> = isins.iter().map(String::as_str).collect();
                lines.push(format!("{}: {}", label, joined.join(", ")));
            }
        }

        lines
    }
}

// ============================================================================
// TESTS
// ============================================================================
