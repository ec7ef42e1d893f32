//! Report View Widget
//! Central scrollable pane showing the report of the last action.

use crate::report::Report;
use egui::{RichText, ScrollArea};

/// Holds the current report; each action replaces it.
#[derive(Default)]
pub struct ReportView {
    report: Option<Report>,
    rendered: String,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shown report
    pub fn set_report(&mut self, report: Report) {
        self.rendered = report.to_string();
        self.report = Some(report);
    }

    /// Draw the report pane
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Upload a dataset to begin").size(20.0));
            });
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(&report.title).size(18.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Copy JSON").clicked() {
                    match report.to_json() {
                        Ok(json) => ui.ctx().copy_text(json),
                        Err(e) => log::error!("Failed to serialize report: {}", e),
                    }
                }
                if ui.button("Copy Text").clicked() {
                    ui.ctx().copy_text(self.rendered.clone());
                }
            });
        });
        ui.separator();

        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(&self.rendered).monospace().size(13.0));
            });
    }
}
