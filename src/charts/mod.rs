//! Charts module - Chart specifications and rendering

mod plotter;

pub use plotter::{ChartBody, ChartError, ChartPlotter, ChartSpec};
