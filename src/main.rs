// GUI-subsystem binary: no console window is allocated on Windows.
#![windows_subsystem = "windows"]

use eframe::egui;

use easel::app::EaselApp;

fn main() -> Result<(), eframe::Error> {
    // Initialize session log (overwrites previous session log)
    easel::logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("Easel"),
        ..Default::default()
    };

    eframe::run_native("Easel", options, Box::new(|cc| Box::new(EaselApp::new(cc))))
}
