//! Dataset Inspector Module
//! Read-only report of the issues the cleaner will fix.

use crate::data::columns::{find_column, has_spaces, text_values, AMOUNT_IN_USD, DATE};
use crate::data::dates::parse_date;
use crate::data::loader::{column_dtypes, column_null_counts};
use crate::report::Report;
use polars::prelude::*;

/// Findings of a pre-clean inspection.
#[derive(Debug, Clone, Default)]
pub struct Inspection {
    pub columns: Vec<String>,
    pub columns_with_spaces: Vec<String>,
    pub null_counts: Vec<(String, String)>,
    pub dtypes: Vec<(String, String)>,
    /// Non-null amounts containing anything other than digits and commas.
    pub non_numeric_amounts: Option<usize>,
    /// Dates that are missing or do not parse.
    pub invalid_dates: Option<usize>,
}

impl Inspection {
    pub fn run(df: &DataFrame) -> PolarsResult<Self> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let columns_with_spaces = columns.iter().filter(|c| has_spaces(c)).cloned().collect();

        let non_numeric_amounts = match find_column(df, AMOUNT_IN_USD) {
            Some(col) => Some(
                text_values(col)?
                    .iter()
                    .flatten()
                    .filter(|v| !is_plain_amount(v))
                    .count(),
            ),
            None => None,
        };

        let invalid_dates = match find_column(df, DATE) {
            Some(col) if col.dtype() == &DataType::Date => Some(col.null_count()),
            Some(col) => Some(
                text_values(col)?
                    .iter()
                    .filter(|v| v.as_deref().and_then(parse_date).is_none())
                    .count(),
            ),
            None => None,
        };

        Ok(Self {
            columns,
            columns_with_spaces,
            null_counts: column_null_counts(df),
            dtypes: column_dtypes(df),
            non_numeric_amounts,
            invalid_dates,
        })
    }

    pub fn to_report(&self) -> Report {
        let mut report = Report::new("Dataset Cleaning Report (Before Cleaning)")
            .text("Original Column Names", format!("{:?}", self.columns));

        if !self.columns_with_spaces.is_empty() {
            report = report.text(
                "Columns with spaces",
                format!("{:?}", self.columns_with_spaces),
            );
        }

        report = report
            .table("Null Values per Column", self.null_counts.clone())
            .table("Current Data Types", self.dtypes.clone());

        if let Some(count) = self.non_numeric_amounts {
            report = report.text("Amount entries with non-numeric values", count.to_string());
        }
        if let Some(count) = self.invalid_dates {
            report = report.text("Invalid date entries", count.to_string());
        }

        report.with_footer("These are the issues that will be fixed in cleaning.")
    }
}

/// Only ASCII digits and thousands separators.
fn is_plain_amount(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit() || c == ',')
}
