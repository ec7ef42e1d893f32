//! Funding Aggregator Module
//! Yearly totals, frequency rankings and amount statistics over a cleaned dataset.

use crate::data::columns::{
    find_column, text_values, AMOUNT_IN_USD, CITY_LOCATION, DATE, INDUSTRY_VERTICAL,
    INVESTMENT_TYPE, INVESTORS_NAME, STARTUP_NAME,
};
use crate::data::dates::{from_epoch_days, parse_date, to_epoch_days};
use crate::report::Report;
use anyhow::{Context, Result};
use chrono::Datelike;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};
use std::collections::{BTreeMap, HashMap};

/// Total funding for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
}

/// A distinct value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Descriptive statistics of disclosed (non-zero) amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountStats {
    pub disclosed: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub largest: f64,
}

/// Everything the analyzer and the charts need; `None` means the column is absent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FundingSummary {
    pub yearly_totals: Option<Vec<YearTotal>>,
    pub top_sectors: Option<Vec<ValueCount>>,
    pub top_cities: Option<Vec<ValueCount>>,
    pub top_startups: Option<Vec<ValueCount>>,
    pub top_investors: Option<Vec<ValueCount>>,
    pub investment_types: Option<Vec<ValueCount>>,
    pub amount_stats: Option<AmountStats>,
}

/// Ranking slots computed in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Ranking {
    Sectors,
    Cities,
    Startups,
    Investors,
    InvestmentTypes,
}

impl Ranking {
    fn column(self) -> &'static str {
        match self {
            Ranking::Sectors => INDUSTRY_VERTICAL,
            Ranking::Cities => CITY_LOCATION,
            Ranking::Startups => STARTUP_NAME,
            Ranking::Investors => INVESTORS_NAME,
            Ranking::InvestmentTypes => INVESTMENT_TYPE,
        }
    }
}

/// Computes the funding summary.
pub struct FundingAggregator {
    top_n: usize,
}

impl FundingAggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Compute every aggregation the dataset supports.
    pub fn summarize(&self, df: &DataFrame) -> Result<FundingSummary> {
        let yearly_totals = match find_column(df, DATE) {
            Some(_) => Some(Self::yearly_totals(df)?),
            None => None,
        };

        let rankings = [
            Ranking::Sectors,
            Ranking::Cities,
            Ranking::Startups,
            Ranking::Investors,
            Ranking::InvestmentTypes,
        ];

        // Use rayon for parallel counting
        let mut counted: HashMap<Ranking, Vec<ValueCount>> = rankings
            .par_iter()
            .filter_map(|&ranking| {
                let col = find_column(df, ranking.column())?;
                let limit = match ranking {
                    Ranking::InvestmentTypes => None,
                    _ => Some(self.top_n),
                };
                Some(
                    Self::value_counts(col, limit)
                        .with_context(|| format!("Failed to count '{}'", ranking.column()))
                        .map(|counts| (ranking, counts)),
                )
            })
            .collect::<Result<_>>()?;

        let amount_stats = match find_column(df, AMOUNT_IN_USD) {
            Some(col) => Self::amount_stats(col)?,
            None => None,
        };

        Ok(FundingSummary {
            yearly_totals,
            top_sectors: counted.remove(&Ranking::Sectors),
            top_cities: counted.remove(&Ranking::Cities),
            top_startups: counted.remove(&Ranking::Startups),
            top_investors: counted.remove(&Ranking::Investors),
            investment_types: counted.remove(&Ranking::InvestmentTypes),
            amount_stats,
        })
    }

    /// Sum of amounts per calendar year, ascending. Rows with an invalid date are skipped.
    pub fn yearly_totals(df: &DataFrame) -> Result<Vec<YearTotal>> {
        let date_col = find_column(df, DATE).context("No date column")?;
        let days = Self::epoch_days(date_col)?;
        let amounts = Self::amounts(df)?;

        let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
        for (day, amount) in days.into_iter().zip(amounts) {
            if let Some(date) = day.and_then(from_epoch_days) {
                *totals.entry(date.year()).or_insert(0.0) += amount.unwrap_or(0.0);
            }
        }

        Ok(totals
            .into_iter()
            .map(|(year, total)| YearTotal { year, total })
            .collect())
    }

    /// Frequency of each non-null value, most frequent first.
    ///
    /// Ties keep the order of first appearance.
    pub fn value_counts(col: &Column, limit: Option<usize>) -> Result<Vec<ValueCount>> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (idx, value) in text_values(col)?.into_iter().enumerate() {
            if let Some(value) = value {
                counts.entry(value).or_insert((0, idx)).0 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(value, (count, first))| (value, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let limit = limit.unwrap_or(ranked.len());
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(value, count, _)| ValueCount { value, count })
            .collect())
    }

    /// Statistics over amounts greater than zero; `None` when nothing is disclosed.
    pub fn amount_stats(col: &Column) -> Result<Option<AmountStats>> {
        let disclosed: Vec<f64> = col
            .cast(&DataType::Float64)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();

        if disclosed.is_empty() {
            return Ok(None);
        }

        let std_dev = if disclosed.len() > 1 {
            disclosed.iter().std_dev()
        } else {
            0.0
        };

        Ok(Some(AmountStats {
            disclosed: disclosed.len(),
            total: disclosed.iter().sum(),
            mean: disclosed.iter().mean(),
            median: Data::new(disclosed.clone()).median(),
            std_dev,
            largest: Statistics::max(disclosed.iter()),
        }))
    }

    /// Physical day numbers of the date column, parsing text when it is not typed yet.
    fn epoch_days(col: &Column) -> Result<Vec<Option<i32>>> {
        if col.dtype() == &DataType::Date {
            let physical = col.cast(&DataType::Int32)?;
            return Ok(physical.as_materialized_series().i32()?.into_iter().collect());
        }

        Ok(text_values(col)?
            .into_iter()
            .map(|v| v.as_deref().and_then(parse_date).map(to_epoch_days))
            .collect())
    }

    fn amounts(df: &DataFrame) -> Result<Vec<Option<f64>>> {
        match find_column(df, AMOUNT_IN_USD) {
            Some(col) => Ok(col
                .cast(&DataType::Float64)?
                .as_materialized_series()
                .f64()?
                .into_iter()
                .collect()),
            None => Ok(vec![None; df.height()]),
        }
    }
}

impl FundingSummary {
    pub fn to_report(&self) -> Report {
        let mut report = Report::new("Startup Funding Analysis");

        if let Some(totals) = &self.yearly_totals {
            let rows = totals
                .iter()
                .map(|t| (t.year.to_string(), format_amount(t.total)))
                .collect();
            report = report.table("Funding Trends (by Year)", rows);
        }

        let rankings = [
            ("Top 5 Sectors", &self.top_sectors),
            ("Top 5 Cities", &self.top_cities),
            ("Top 5 Startups", &self.top_startups),
            ("Top 5 Active Investors", &self.top_investors),
            ("Investment Type Distribution", &self.investment_types),
        ];
        for (heading, counts) in rankings {
            if let Some(counts) = counts {
                let rows = counts
                    .iter()
                    .map(|vc| (vc.value.clone(), vc.count.to_string()))
                    .collect();
                report = report.table(heading, rows);
            }
        }

        if let Some(stats) = &self.amount_stats {
            report = report.table(
                "Disclosed Funding Amounts",
                vec![
                    ("Rounds".to_string(), stats.disclosed.to_string()),
                    ("Total".to_string(), format_amount(stats.total)),
                    ("Mean".to_string(), format_amount(stats.mean)),
                    ("Median".to_string(), format_amount(stats.median)),
                    ("Std".to_string(), format_amount(stats.std_dev)),
                    ("Largest".to_string(), format_amount(stats.largest)),
                ],
            );
        }

        report.with_footer("Analysis Completed!")
    }
}

/// Whole-dollar amount with thousands separators.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataCleaner;
    use pretty_assertions::assert_eq;

    fn cleaned() -> DataFrame {
        let raw = df!(
            "Startup Name" => &["Acme", "Beta", "Acme", "Gamma", "Beta", "Acme"],
            "Date" => &["01/02/2019", "15/06/2019", "2020-03-01", "bad", "2020-07-09", "2021-01-01"],
            "City  Location" => &[Some("Mumbai"), Some("Pune"), Some("Mumbai"), None, Some("Pune"), Some("Delhi")],
            "Amount in USD" => &["1,000", "2,000", "undisclosed", "500", "3,000", "4,000"],
            "Investors Name" => &[Some("Accel"), None, Some("Accel"), Some("Sequoia"), None, None],
            "InvestmentType" => &["Seed", "Seed", "Series A", "Seed", "Series A", "Private Equity"]
        )
        .unwrap();
        DataCleaner::default().clean(&raw).unwrap().df
    }

    fn counts(pairs: &[(&str, usize)]) -> Vec<ValueCount> {
        pairs
            .iter()
            .map(|(v, c)| ValueCount {
                value: v.to_string(),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn test_yearly_totals_skip_invalid_dates() {
        let totals = FundingAggregator::yearly_totals(&cleaned()).unwrap();
        assert_eq!(
            totals,
            vec![
                YearTotal { year: 2019, total: 3_000.0 },
                YearTotal { year: 2020, total: 3_000.0 },
                YearTotal { year: 2021, total: 4_000.0 },
            ]
        );
    }

    #[test]
    fn test_value_counts_ties_keep_first_appearance() {
        let df = cleaned();
        let col = df.column(CITY_LOCATION).unwrap();
        let top = FundingAggregator::value_counts(col, Some(2)).unwrap();
        assert_eq!(top, counts(&[("Mumbai", 2), ("Pune", 2)]));
    }

    #[test]
    fn test_value_counts_skip_nulls() {
        let df = cleaned();
        let col = df.column(INVESTORS_NAME).unwrap();
        let all = FundingAggregator::value_counts(col, None).unwrap();
        assert_eq!(all, counts(&[("Accel", 2), ("Sequoia", 1)]));
    }

    #[test]
    fn test_summary_covers_present_columns() {
        let summary = FundingAggregator::new(5).summarize(&cleaned()).unwrap();

        assert_eq!(
            summary.top_startups,
            Some(counts(&[("Acme", 3), ("Beta", 2), ("Gamma", 1)]))
        );
        // "InvestmentType" canonicalizes to "investmenttype", not investment_type
        assert_eq!(summary.investment_types, None);
        assert_eq!(summary.top_sectors, None);
        assert!(summary.yearly_totals.is_some());
    }

    #[test]
    fn test_investment_types_are_not_truncated() {
        let df = df!(
            "investment_type" => &["a", "b", "c", "d", "e", "f", "a"]
        )
        .unwrap();
        let summary = FundingAggregator::new(5).summarize(&df).unwrap();
        assert_eq!(summary.investment_types.map(|v| v.len()), Some(6));
    }

    #[test]
    fn test_amount_stats_use_disclosed_values() {
        let stats = FundingAggregator::new(5)
            .summarize(&cleaned())
            .unwrap()
            .amount_stats
            .unwrap();
        assert_eq!(stats.disclosed, 5);
        assert_eq!(stats.total, 10_500.0);
        assert_eq!(stats.median, 2_000.0);
        assert_eq!(stats.largest, 4_000.0);
        assert!((stats.mean - 2_100.0).abs() < 1e-9);
    }

    #[test]
    fn test_amount_stats_none_when_all_zero() {
        let df = df!("amount_in_usd" => &[0.0f64, 0.0]).unwrap();
        let col = df.column(AMOUNT_IN_USD).unwrap();
        assert_eq!(FundingAggregator::amount_stats(col).unwrap(), None);
    }

    #[test]
    fn test_report_sections() {
        let text = FundingAggregator::new(5)
            .summarize(&cleaned())
            .unwrap()
            .to_report()
            .to_string();
        assert!(text.contains("Funding Trends (by Year):"));
        assert!(text.contains("Top 5 Cities:"));
        assert!(!text.contains("Top 5 Sectors:"));
        assert!(text.trim_end().ends_with("Analysis Completed!"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.4), "999");
        assert_eq!(format_amount(1_000_000.0), "1,000,000");
        assert_eq!(format_amount(-12_345.0), "-12,345");
    }
}
