#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shape Canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(shape_canvas::ShapeEditorApp::new(cc)))),
    )
}

// The canvas is a desktop app; there is no web entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
