//! GUI rendering functions.
//!
//! Contains UI layout and component rendering logic.

use eframe::egui::{self, Color32, Pos2, Rect, RichText, Stroke, TextureHandle, Vec2};

use super::state::{CaptureState, ReaderState};
use crate::capture::TrimRect;

/// Render the game ID input and read buttons.
/// Returns (read_clicked, latest_clicked).
pub fn render_reader_controls(
    ui: &mut egui::Ui,
    state: &mut ReaderState,
    busy: bool,
) -> (bool, bool) {
    let mut read_clicked = false;
    let mut latest_clicked = false;

    ui.horizontal(|ui| {
        ui.label("ゲームID:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.game_id_text)
                .desired_width(120.0)
                .hint_text("123456"),
        );
        let enter_pressed =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_enabled_ui(!busy, |ui| {
            if ui.button("読み込み").clicked() || (enter_pressed && !busy) {
                read_clicked = true;
            }
            if ui.button("最新を読み込み").clicked() {
                latest_clicked = true;
            }
        });
    });

    (read_clicked, latest_clicked)
}

/// Render the summary of the last game.
pub fn render_result(ui: &mut egui::Ui, state: &mut ReaderState) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_sized(
            ui.available_size(),
            egui::TextEdit::multiline(&mut state.result_text),
        );
    });
}

/// Render a one-line status bar.
pub fn render_status_bar(ui: &mut egui::Ui, status: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(status).size(12.0));
    });
}

/// Render the capture actions.
/// Returns (retake_clicked, save_clicked).
pub fn render_capture_actions(ui: &mut egui::Ui, state: &mut CaptureState) -> (bool, bool) {
    let mut retake_clicked = false;
    let mut save_clicked = false;

    ui.horizontal(|ui| {
        if ui.button("撮り直し").clicked() {
            retake_clicked = true;
        }

        ui.add_space(12.0);
        ui.label("保存先:");
        ui.add(egui::TextEdit::singleline(&mut state.save_path).desired_width(320.0));

        ui.add_enabled_ui(state.can_save(), |ui| {
            if ui.button("JPEG で保存").clicked() {
                save_clicked = true;
            }
        });
    });

    (retake_clicked, save_clicked)
}

/// Fit an image of `size` pixels into `available`, keeping its aspect ratio
/// and never scaling up.
pub fn fit_image(available: Rect, size: [usize; 2]) -> Rect {
    let (w, h) = (size[0].max(1) as f32, size[1].max(1) as f32);
    let scale = (available.width() / w).min(available.height() / h).min(1.0);
    Rect::from_min_size(available.min, Vec2::new(w * scale, h * scale))
}

/// Draw a texture stretched over `rect`.
pub fn paint_texture(painter: &egui::Painter, texture: &TextureHandle, rect: Rect) {
    painter.image(
        texture.id(),
        rect,
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );
}

/// Draw a selection rectangle with center cross lines.
pub fn paint_selection(painter: &egui::Painter, rect: Rect) {
    let stroke = Stroke::new(1.0, Color32::RED);
    painter.rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(255, 0, 0, 24));
    painter.rect_stroke(rect, 0.0, stroke);
    let center = rect.center();
    painter.line_segment(
        [
            Pos2::new(rect.left(), center.y),
            Pos2::new(rect.right(), center.y),
        ],
        stroke,
    );
    painter.line_segment(
        [
            Pos2::new(center.x, rect.top()),
            Pos2::new(center.x, rect.bottom()),
        ],
        stroke,
    );
}

/// Outline the trim rectangle over an image drawn at `image_rect`.
///
/// `scale` is image pixels per screen point.
pub fn paint_trim_rect(painter: &egui::Painter, image_rect: Rect, trim: TrimRect, scale: f32) {
    let min = image_rect.min + Vec2::new(trim.x as f32, trim.y as f32) / scale;
    let size = Vec2::new(trim.width as f32, trim.height as f32) / scale;
    painter.rect_stroke(
        Rect::from_min_size(min, size).expand(1.0),
        0.0,
        Stroke::new(1.0, Color32::from_rgb(255, 64, 64)),
    );
}
