//! Funding Lens - Startup Funding Data Analysis GUI

use eframe::egui;
use funding_lens::config::AppConfig;
use funding_lens::gui::FundingApp;
use funding_lens::session::Session;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Startup Funding Analysis"),
        ..Default::default()
    };

    let session = Session::new(AppConfig::default());
    log::info!("Starting Funding Lens");

    // Run the application
    eframe::run_native(
        "Funding Lens",
        options,
        Box::new(|cc| Ok(Box::new(FundingApp::new(cc, session)))),
    )
}
