mod app;
mod color;
mod data;
mod error;
mod report;
mod settings;
mod state;
mod ui;

use app::RustySalesApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Diwali Sales Data Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(RustySalesApp::default()))),
    )
}
