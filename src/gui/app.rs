//! Funding Lens Main Application
//! Main window with control panel, report pane and chart windows.

use crate::error::ActionError;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ReportView};
use crate::report::Report;
use crate::session::Session;
use egui::SidePanel;

/// Main application window.
pub struct FundingApp {
    session: Session,
    control_panel: ControlPanel,
    report_view: ReportView,
    chart_viewer: ChartViewer,
}

impl FundingApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        Self {
            session,
            control_panel: ControlPanel::new(),
            report_view: ReportView::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    /// Handle CSV file selection
    fn handle_upload(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file()
        else {
            self.control_panel.set_status("No file selected");
            return;
        };

        match self.session.load(&path) {
            Ok(report) => {
                self.chart_viewer.clear();
                self.show_report("Dataset uploaded successfully", report);
            }
            Err(e) => self.report_error(e),
        }
    }

    fn handle_visualize(&mut self) {
        match self.session.visualize() {
            Ok(charts) => {
                let count = charts.len();
                self.chart_viewer.open_charts(charts);
                log::info!("Opened {} chart windows", count);
                self.control_panel.set_status(&format!(
                    "Visualization Completed: {} new charts, {} open",
                    count,
                    self.chart_viewer.open_count()
                ));
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Dispatch a control panel action
    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::Upload => self.handle_upload(),
            ControlPanelAction::Inspect => {
                let result = self.session.inspect();
                self.apply_report("Inspection complete", result);
            }
            ControlPanelAction::Clean => {
                let result = self.session.clean();
                self.apply_report("Data cleaned successfully", result);
            }
            ControlPanelAction::Analyze => {
                let result = self.session.analyze();
                self.apply_report("Analysis Completed", result);
            }
            ControlPanelAction::Visualize => self.handle_visualize(),
            ControlPanelAction::Recommend => {
                let result = self.session.recommendations();
                self.apply_report("Recommendations shown", result);
            }
            ControlPanelAction::None => return,
        }

        self.control_panel.csv_path = self.session.dataset().map(|d| d.source.clone());
        self.control_panel.dataset_loaded = self.session.has_dataset();
        self.control_panel.dataset_cleaned = self.session.is_cleaned();
    }

    fn apply_report(&mut self, status: &str, result: Result<Report, ActionError>) {
        match result {
            Ok(report) => self.show_report(status, report),
            Err(e) => self.report_error(e),
        }
    }

    fn show_report(&mut self, status: &str, report: Report) {
        self.report_view.set_report(report);
        self.control_panel.set_status(status);
    }

    /// Log the failure and show a blocking notice; the current state is kept.
    fn report_error(&mut self, error: ActionError) {
        if error.is_precondition() {
            log::warn!("{}", error);
        } else {
            log::error!("{}", error);
        }

        self.control_panel.set_status(&format!("Error: {}", error));
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Error")
            .set_description(error.to_string())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

impl eframe::App for FundingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        // Central panel - Report
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_view.show(ui);
        });

        // Floating chart windows
        self.chart_viewer.show(ctx);
    }
}
