//! Control Panel Widget
//! Left side panel with the pipeline action buttons and status line.

use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel with file selection and pipeline controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub status: String,
    pub dataset_loaded: bool,
    pub dataset_cleaned: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            status: "Ready".to_string(),
            dataset_loaded: false,
            dataset_cleaned: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Funding Lens")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Startup Funding Data Analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file selected".to_string());

                ui.label(RichText::new(&path_text).size(12.0).color(
                    if self.csv_path.is_some() {
                        ui.visuals().text_color()
                    } else {
                        Color32::GRAY
                    },
                ));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Pipeline Buttons =====
        ui.label(RichText::new("⚙️ Pipeline").size(14.0).strong());
        ui.add_space(8.0);

        // Buttons stay clickable out of order; the session reports missing steps
        let buttons = [
            ("📂 Upload Dataset", ControlPanelAction::Upload),
            ("🔍 Show Cleaning Steps", ControlPanelAction::Inspect),
            ("🧹 Clean Data", ControlPanelAction::Clean),
            ("📈 Analyze Data", ControlPanelAction::Analyze),
            ("📊 Visualize Insights", ControlPanelAction::Visualize),
            ("💡 Recommendations", ControlPanelAction::Recommend),
        ];

        ui.vertical_centered(|ui| {
            for (label, button_action) in buttons {
                let button = egui::Button::new(RichText::new(label).size(15.0))
                    .min_size(egui::vec2(220.0, 32.0));
                if ui.add(button).clicked() {
                    action = button_action;
                }
                ui.add_space(6.0);
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📋 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            Self::step_badge(ui, "Loaded", self.dataset_loaded);
            Self::step_badge(ui, "Cleaned", self.dataset_cleaned);
        });

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") || self.status.contains("failed") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("success") || self.status.contains("Completed") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn step_badge(ui: &mut egui::Ui, label: &str, done: bool) {
        let (icon, color) = if done {
            ("✓", Color32::from_rgb(40, 167, 69))
        } else {
            ("○", Color32::GRAY)
        };
        ui.label(RichText::new(format!("{} {}", icon, label)).size(12.0).color(color));
        ui.add_space(10.0);
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    Upload,
    Inspect,
    Clean,
    Analyze,
    Visualize,
    Recommend,
}
