//! plainpad — a minimal plain-text editor.

mod app;
mod document;
mod prefs;
mod session;

use app::PlainPadApp;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("plainpad")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "plainpad",
        options,
        Box::new(|cc| Box::new(PlainPadApp::new(cc))),
    )
}
