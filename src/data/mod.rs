//! Data module - CSV loading, inspection and cleaning

pub mod columns;
pub mod dates;
mod cleaner;
mod inspector;
mod loader;

pub use cleaner::{CleanOutcome, DataCleaner};
pub use inspector::Inspection;
pub use loader::{DatasetLoader, LoadedDataset, LoaderError};
