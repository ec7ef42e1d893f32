//! Data Cleaner Module
//! Canonicalizes column names and coerces the funding columns into typed values.

use crate::config::AppConfig;
use crate::data::columns::{
    canonical_name, rename_columns, text_values, AMOUNT_IN_USD, CITY_LOCATION, DATE,
    INDUSTRY_VERTICAL, STARTUP_NAME,
};
use crate::data::dates::{parse_date, to_epoch_days};
use crate::report::Report;
use anyhow::{Context, Result};
use polars::prelude::*;

/// Result of a cleaning pass.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub df: DataFrame,
    pub rows_before: usize,
    pub rows_dropped: usize,
    pub invalid_dates: usize,
    pub zeroed_amounts: usize,
}

impl CleanOutcome {
    pub fn to_report(&self) -> Report {
        let columns: Vec<String> = self
            .df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        Report::new("Data cleaned successfully!")
            .text("Rows after cleaning", self.df.height().to_string())
            .text("Columns", format!("{:?}", columns))
            .table(
                "Changes",
                vec![
                    ("Rows before".to_string(), self.rows_before.to_string()),
                    ("Empty rows dropped".to_string(), self.rows_dropped.to_string()),
                    ("Invalid dates".to_string(), self.invalid_dates.to_string()),
                    ("Amounts set to 0".to_string(), self.zeroed_amounts.to_string()),
                ],
            )
    }
}

/// Applies the fixed sequence of cleaning rules.
pub struct DataCleaner {
    unknown_label: String,
    undisclosed_token: String,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl DataCleaner {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            unknown_label: config.unknown_label.clone(),
            undisclosed_token: config.undisclosed_token.clone(),
        }
    }

    /// Clean a dataset. Running this on its own output changes nothing.
    pub fn clean(&self, df: &DataFrame) -> Result<CleanOutcome> {
        let rows_before = df.height();

        // 1. Canonical column names
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| canonical_name(name.as_str()))
            .collect();
        let df = rename_columns(df, &names).context("Column names collide after normalizing")?;

        // 2. Completely empty rows
        let mut df = Self::drop_empty_rows(df)?;
        let rows_dropped = rows_before - df.height();

        // 3. City
        self.fill_text_column(&mut df, CITY_LOCATION, true)?;

        // 4. Date
        let invalid_dates = if df.column(DATE).is_ok() {
            Self::parse_date_column(&mut df)?
        } else {
            0
        };

        // 5. Amount
        let zeroed_amounts = self.normalize_amounts(&mut df)?;

        // 6. Remaining text columns
        for name in [STARTUP_NAME, INDUSTRY_VERTICAL] {
            self.fill_text_column(&mut df, name, false)?;
        }

        // 7. Positional index is contiguous once empty rows are filtered out
        log::debug!(
            "Cleaned {} -> {} rows ({} invalid dates, {} zeroed amounts)",
            rows_before,
            df.height(),
            invalid_dates,
            zeroed_amounts
        );

        Ok(CleanOutcome {
            df,
            rows_before,
            rows_dropped,
            invalid_dates,
            zeroed_amounts,
        })
    }

    /// Remove rows where every column is null.
    pub fn drop_empty_rows(df: DataFrame) -> Result<DataFrame> {
        if df.width() == 0 {
            return Ok(df);
        }

        df.lazy()
            .filter(any_horizontal([all().is_not_null()])?)
            .collect()
            .context("Failed to drop empty rows")
    }

    /// Fill nulls in a text column with the unknown label.
    ///
    /// With `create` the column is added when absent.
    fn fill_text_column(&self, df: &mut DataFrame, name: &str, create: bool) -> Result<()> {
        let values: Vec<String> = match df.column(name) {
            Ok(col) => text_values(col)?
                .into_iter()
                .map(|v| v.unwrap_or_else(|| self.unknown_label.clone()))
                .collect(),
            Err(_) if create => vec![self.unknown_label.clone(); df.height()],
            Err(_) => return Ok(()),
        };

        df.with_column(Series::new(name.into(), values))
            .with_context(|| format!("Failed to update column '{}'", name))?;
        Ok(())
    }

    /// Convert the date column to `Date`; unparseable entries become null.
    ///
    /// Returns the number of null dates afterwards.
    fn parse_date_column(df: &mut DataFrame) -> Result<usize> {
        let col = df.column(DATE)?;

        if col.dtype() != &DataType::Date {
            let days: Vec<Option<i32>> = text_values(col)?
                .into_iter()
                .map(|v| v.as_deref().and_then(parse_date).map(to_epoch_days))
                .collect();

            let dates = Series::new(DATE.into(), days)
                .cast(&DataType::Date)
                .context("Failed to build date column")?;
            df.with_column(dates)?;
        }

        Ok(df.column(DATE)?.null_count())
    }

    /// Normalize the amount column to non-negative `Float64`, synthesizing it if absent.
    ///
    /// Returns how many entries were replaced by zero.
    fn normalize_amounts(&self, df: &mut DataFrame) -> Result<usize> {
        let raw: Vec<Option<f64>> = match df.column(AMOUNT_IN_USD) {
            Ok(col) if col.dtype().is_primitive_numeric() => col
                .cast(&DataType::Float64)?
                .as_materialized_series()
                .f64()?
                .into_iter()
                .collect(),
            Ok(col) => text_values(col)?
                .into_iter()
                .map(|v| v.and_then(|s| self.parse_amount(&s)))
                .collect(),
            Err(_) => vec![None; df.height()],
        };

        let mut zeroed = 0;
        let amounts: Vec<f64> = raw
            .into_iter()
            .map(|v| match v {
                Some(amount) if amount.is_finite() && amount >= 0.0 => amount,
                _ => {
                    zeroed += 1;
                    0.0
                }
            })
            .collect();

        df.with_column(Series::new(AMOUNT_IN_USD.into(), amounts))
            .context("Failed to update amount column")?;
        Ok(zeroed)
    }

    /// Parse one free-form amount. `None` means missing or unparseable.
    pub fn parse_amount(&self, raw: &str) -> Option<f64> {
        let stripped = raw.replace(',', "");
        let value = stripped.trim();
        if value == self.undisclosed_token {
            return None;
        }
        value.parse::<f64>().ok()
    }
}
