//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod report_view;

pub use app::FundingApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use report_view::ReportView;
