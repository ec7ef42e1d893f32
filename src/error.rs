//! Action Errors
//! Failure kinds returned by session actions.

use crate::charts::ChartError;
use crate::data::LoaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Please upload dataset first")]
    NoDataset,
    #[error("Please clean the dataset first")]
    NotCleaned,
    #[error("The dataset has no rows")]
    EmptyDataset,
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Inspection failed: {0:#}")]
    Inspection(anyhow::Error),
    #[error("Cleaning failed: {0:#}")]
    Cleaning(anyhow::Error),
    #[error("Analysis failed: {0:#}")]
    Analysis(anyhow::Error),
    #[error("Visualization failed: {0}")]
    Visualization(#[from] ChartError),
}

impl ActionError {
    /// Whether the action was refused because a prior step is missing.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ActionError::NoDataset | ActionError::NotCleaned | ActionError::EmptyDataset
        )
    }
}
