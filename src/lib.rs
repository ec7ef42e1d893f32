//! Funding Lens - Startup Funding Data Analysis
//!
//! Load a CSV of startup funding rounds, inspect and clean it, then view
//! aggregated reports and charts. The [`session::Session`] owns the dataset
//! and exposes one method per user action; the GUI only renders results.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod insights;
pub mod report;
pub mod session;
pub mod stats;
