//! GUI module for both tools.
//!
//! Provides egui/eframe front ends for the result reader and the map capture.

pub mod capture_app;
pub mod reader_app;
pub mod render;
pub mod state;

use eframe::egui::{self, Vec2};

pub use capture_app::CaptureApp;
pub use reader_app::ReaderApp;

/// Setup fonts with Japanese support.
pub(crate) fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Common Japanese fonts on Windows: Yu Gothic, Meiryo, MS Gothic
    let font_paths = [
        "C:\\Windows\\Fonts\\YuGothM.ttc",
        "C:\\Windows\\Fonts\\meiryo.ttc",
        "C:\\Windows\\Fonts\\msgothic.ttc",
    ];

    let mut font_loaded = false;
    for font_path in &font_paths {
        if let Ok(font_data) = std::fs::read(font_path) {
            fonts.font_data.insert(
                "japanese_font".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );

            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "japanese_font".to_owned());
            fonts
                .families
                .entry(egui::FontFamily::Monospace)
                .or_default()
                .insert(0, "japanese_font".to_owned());

            crate::log(&format!("Loaded Japanese font from: {}", font_path));
            font_loaded = true;
            break;
        }
    }

    if !font_loaded {
        crate::log("Warning: Could not load Japanese font. Text may not display correctly.");
    }

    ctx.set_fonts(fonts);
}

/// Run the result reader window. Blocks until the window is closed.
pub fn run_reader_gui() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(520.0, 360.0))
            .with_min_inner_size(Vec2::new(320.0, 240.0))
            .with_title("TM Result Reader"),
        ..Default::default()
    };

    eframe::run_native(
        "TM Result Reader",
        options,
        Box::new(|cc| {
            crate::log("GUI: Creating ReaderApp instance...");
            Ok(Box::new(ReaderApp::new(cc)))
        }),
    )
}

/// Run the map capture window. Blocks until the window is closed.
pub fn run_capture_gui() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(800.0, 600.0))
            .with_min_inner_size(Vec2::new(320.0, 240.0))
            .with_title("TM Map Capture"),
        ..Default::default()
    };

    eframe::run_native(
        "TM Map Capture",
        options,
        Box::new(|cc| {
            crate::log("GUI: Creating CaptureApp instance...");
            Ok(Box::new(CaptureApp::new(cc)))
        }),
    )
}
