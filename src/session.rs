//! Session Module
//! Owns the current dataset and runs each user action against it.

use crate::charts::{ChartPlotter, ChartSpec};
use crate::config::AppConfig;
use crate::data::{DataCleaner, DatasetLoader, Inspection};
use crate::error::ActionError;
use crate::insights;
use crate::report::Report;
use crate::stats::{FundingAggregator, FundingSummary};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// The loaded table and where it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub df: DataFrame,
    pub source: PathBuf,
    pub cleaned: bool,
}

/// Application state: at most one dataset, replaced by Load and Clean.
pub struct Session {
    config: AppConfig,
    dataset: Option<Dataset>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn is_cleaned(&self) -> bool {
        self.dataset.as_ref().is_some_and(|d| d.cleaned)
    }

    /// Load a CSV file, replacing the current dataset on success.
    pub fn load(&mut self, path: &Path) -> Result<Report, ActionError> {
        let loader = DatasetLoader::new(&self.config);
        let loaded = loader.load_file(path)?;
        let report = loader.load_report(&loaded);

        log::info!(
            "Loaded {} rows, {} columns from {}",
            loaded.df.height(),
            loaded.df.width(),
            path.display()
        );

        self.dataset = Some(Dataset {
            df: loaded.df,
            source: path.to_path_buf(),
            cleaned: false,
        });
        Ok(report)
    }

    /// Report the issues cleaning will fix.
    pub fn inspect(&self) -> Result<Report, ActionError> {
        let dataset = self.require_loaded()?;
        let inspection = Inspection::run(&dataset.df)
            .map_err(|e| ActionError::Inspection(anyhow::Error::new(e)))?;
        Ok(inspection.to_report())
    }

    /// Clean the dataset in place. On failure the previous table is kept.
    pub fn clean(&mut self) -> Result<Report, ActionError> {
        let dataset = self.require_loaded()?;
        let outcome = DataCleaner::new(&self.config)
            .clean(&dataset.df)
            .map_err(ActionError::Cleaning)?;
        let report = outcome.to_report();

        log::info!(
            "Cleaned dataset: {} rows, {} columns",
            outcome.df.height(),
            outcome.df.width()
        );

        if let Some(dataset) = self.dataset.as_mut() {
            dataset.df = outcome.df;
            dataset.cleaned = true;
        }
        Ok(report)
    }

    /// Compute the funding summary of the cleaned dataset.
    pub fn summarize(&self) -> Result<FundingSummary, ActionError> {
        let dataset = self.require_cleaned()?;
        FundingAggregator::new(self.config.top_n)
            .summarize(&dataset.df)
            .map_err(ActionError::Analysis)
    }

    /// Textual analysis report.
    pub fn analyze(&self) -> Result<Report, ActionError> {
        Ok(self.summarize()?.to_report())
    }

    /// Chart specifications for the visualizer.
    pub fn visualize(&self) -> Result<Vec<ChartSpec>, ActionError> {
        let summary = self.summarize()?;
        Ok(ChartPlotter::build_charts(&summary)?)
    }

    /// Static recommendations; only needs a loaded dataset.
    pub fn recommendations(&self) -> Result<Report, ActionError> {
        self.require_loaded()?;
        Ok(insights::recommendations())
    }

    fn require_loaded(&self) -> Result<&Dataset, ActionError> {
        self.dataset.as_ref().ok_or(ActionError::NoDataset)
    }

    fn require_cleaned(&self) -> Result<&Dataset, ActionError> {
        let dataset = self.require_loaded()?;
        if !dataset.cleaned {
            return Err(ActionError::NotCleaned);
        }
        if dataset.df.height() == 0 {
            return Err(ActionError::EmptyDataset);
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{AMOUNT_IN_USD, CITY_LOCATION, DATE};
    use pretty_assertions::assert_eq;

    const EXAMPLE: &str = "Startup Name,Date,City  Location,Amount in USD,Industry Vertical\n\
                           Acme,01/02/2019,Mumbai,\"1,000,000\",Tech\n\
                           ,,,,\n\
                           Beta,bad-date,,undisclosed,\n";

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "funding_lens_{}_{}.csv",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn loaded_session(name: &str) -> Session {
        let path = write_fixture(name, EXAMPLE);
        let mut session = Session::default();
        let result = session.load(&path);
        std::fs::remove_file(&path).ok();
        result.unwrap();
        session
    }

    #[test]
    fn test_actions_before_load_are_refused() {
        let mut session = Session::default();

        assert!(matches!(session.clean(), Err(ActionError::NoDataset)));
        assert!(matches!(session.analyze(), Err(ActionError::NoDataset)));
        assert!(matches!(session.visualize(), Err(ActionError::NoDataset)));
        assert!(matches!(session.inspect(), Err(ActionError::NoDataset)));
        assert!(matches!(session.recommendations(), Err(ActionError::NoDataset)));
        assert!(!session.has_dataset());
    }

    #[test]
    fn test_analyze_requires_cleaning() {
        let session = loaded_session("needs_clean");
        let err = session.analyze().unwrap_err();
        assert!(matches!(err, ActionError::NotCleaned));
        assert!(err.is_precondition());
    }

    #[test]
    fn test_visualize_requires_cleaning() {
        let session = loaded_session("visualize_needs_clean");
        let err = session.visualize().unwrap_err();
        assert!(matches!(err, ActionError::NotCleaned));
        assert!(err.is_precondition());
    }

    #[test]
    fn test_all_empty_rows_give_empty_dataset() {
        let path = write_fixture("all_empty", "Startup Name,Date,Amount in USD\n,,\n,,\n");
        let mut session = Session::default();
        let result = session.load(&path);
        std::fs::remove_file(&path).ok();
        result.unwrap();

        session.clean().unwrap();
        assert_eq!(session.dataset().unwrap().df.height(), 0);
        assert!(matches!(session.analyze(), Err(ActionError::EmptyDataset)));
        assert!(matches!(session.visualize(), Err(ActionError::EmptyDataset)));
    }

    #[test]
    fn test_visualize_skips_chart_without_valid_dates() {
        let path = write_fixture(
            "bad_dates",
            "Startup Name,Date,City Location,Amount in USD\n\
             Acme,bad,Mumbai,100\n\
             Beta,worse,Pune,200\n",
        );
        let mut session = Session::default();
        let result = session.load(&path);
        std::fs::remove_file(&path).ok();
        result.unwrap();
        session.clean().unwrap();

        let titles: Vec<String> = session
            .visualize()
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Top 5 Cities by Startup Count", "Top 5 Startups by Funding Count"]
        );
    }

    #[test]
    fn test_end_to_end_example() {
        let mut session = loaded_session("end_to_end");
        let rows_loaded = session.dataset().unwrap().df.height();

        session.clean().unwrap();
        let df = &session.dataset().unwrap().df;

        assert!(df.height() <= rows_loaded);
        assert_eq!(df.height(), 2);

        let amounts: Vec<f64> = df
            .column(AMOUNT_IN_USD)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(amounts, vec![1_000_000.0, 0.0]);

        let cities: Vec<Option<&str>> = df
            .column(CITY_LOCATION)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(cities, vec![Some("Mumbai"), Some("Unknown")]);

        let dates = df.column(DATE).unwrap();
        assert_eq!(dates.dtype(), &DataType::Date);
        assert!(dates.get(0).unwrap() != AnyValue::Null);
        assert_eq!(dates.get(1).unwrap(), AnyValue::Null);
    }

    #[test]
    fn test_clean_twice_is_stable() {
        let mut session = loaded_session("twice");
        session.clean().unwrap();
        let first = session.dataset().unwrap().df.clone();
        session.clean().unwrap();
        assert!(first.equals_missing(&session.dataset().unwrap().df));
    }

    #[test]
    fn test_full_pipeline_reports() {
        let mut session = loaded_session("pipeline");
        assert!(session.inspect().is_ok());
        session.clean().unwrap();

        let analysis = session.analyze().unwrap().to_string();
        assert!(analysis.contains("2019"));
        assert!(analysis.contains("Top 5 Cities:"));

        let titles: Vec<String> = session
            .visualize()
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Funding Trends Over Time",
                "Top 5 Sectors by Startup Count",
                "Top 5 Cities by Startup Count",
                "Top 5 Startups by Funding Count",
            ]
        );
        assert!(session.recommendations().is_ok());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut session = loaded_session("keep");
        let missing = std::env::temp_dir().join("funding_lens_does_not_exist.csv");

        assert!(matches!(session.load(&missing), Err(ActionError::Load(_))));
        assert!(matches!(
            session.load(Path::new("")),
            Err(ActionError::Load(_))
        ));
        assert_eq!(session.dataset().unwrap().df.height(), 3);
    }

    #[test]
    fn test_reload_resets_cleaned_flag() {
        let mut session = loaded_session("reload");
        session.clean().unwrap();
        assert!(session.is_cleaned());

        let path = write_fixture("reload_again", EXAMPLE);
        let result = session.load(&path);
        std::fs::remove_file(&path).ok();
        result.unwrap();
        assert!(!session.is_cleaned());
    }

    #[test]
    fn test_recommendations_only_need_load() {
        let session = loaded_session("recommend");
        assert!(session.recommendations().is_ok());
    }
}
