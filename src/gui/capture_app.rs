//! Map capture window.
//!
//! Starts in selection mode: the desktop is frozen into a full-screen image
//! and the user drags the region to keep. Afterwards the selection is shown
//! with its trim rectangle until it is saved or retaken.

use std::path::Path;

use eframe::egui::{self, Color32, Pos2, Rect, TextureHandle, Vec2};
use image::RgbaImage;

use super::render;
use super::state::{CaptureMode, CaptureState};
use crate::capture::{capture_virtual_screen, process_selection, save_jpeg, SelectionRect};
use crate::config::get_config;
use crate::paths;

/// Map capture application.
pub struct CaptureApp {
    state: CaptureState,
    /// Frozen desktop while selecting
    screen: Option<RgbaImage>,
    screen_texture: Option<TextureHandle>,
    /// Selected region shown in preview mode
    preview_texture: Option<TextureHandle>,
}

/// Uploads an RGBA image as an egui texture.
fn load_texture(ctx: &egui::Context, name: &str, img: &RgbaImage) -> TextureHandle {
    let size = [img.width() as usize, img.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

impl CaptureApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        super::setup_fonts(&cc.egui_ctx);

        let mut app = Self {
            state: CaptureState::with_save_path(paths::default_capture_path()),
            screen: None,
            screen_texture: None,
            preview_texture: None,
        };
        app.begin_selection(&cc.egui_ctx);
        app
    }

    /// Freezes the desktop and switches to full-screen selection.
    fn begin_selection(&mut self, ctx: &egui::Context) {
        match capture_virtual_screen() {
            Ok(capture) => {
                self.screen_texture = Some(load_texture(ctx, "screen", &capture.image));
                self.screen = Some(capture.image);
                self.state.drag.cancel();
                self.state.mode = CaptureMode::Selecting;
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
            }
            Err(e) => {
                crate::log(&format!("GUI: Screen capture failed: {:#}", e));
                self.state.status = format!("画面を取得できません: {}", e);
                self.state.mode = CaptureMode::Preview;
            }
        }
    }

    /// Leaves selection mode. A `None` selection (cancelled) keeps the
    /// previous capture.
    fn finish_selection(&mut self, ctx: &egui::Context, selection: Option<SelectionRect>) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        self.state.mode = CaptureMode::Preview;
        self.screen_texture = None;

        let screen = self.screen.take();
        let (Some(selection), Some(screen)) = (selection, screen) else {
            return;
        };

        let config = &get_config().capture;
        if let Some(processed) = process_selection(&screen, selection, config) {
            self.preview_texture = Some(load_texture(ctx, "preview", &processed.selected));
            self.state.status = format!(
                "{}x{} を切り出しました",
                processed.trim.width, processed.trim.height
            );
            self.state.capture = Some(processed);
            self.state.save_path = paths::default_capture_path().display().to_string();
        }
    }

    fn save(&mut self) {
        let Some(capture) = &self.state.capture else {
            return;
        };
        let path = Path::new(self.state.save_path.trim());
        let quality = get_config().capture.jpeg_quality;

        match save_jpeg(&capture.trimmed, path, quality) {
            Ok(()) => self.state.status = format!("保存しました: {}", path.display()),
            Err(e) => {
                crate::log(&format!("GUI: Failed to save capture: {:#}", e));
                self.state.status = format!("保存に失敗しました: {}", e);
            }
        }
    }

    /// Full-screen drag over the frozen desktop.
    /// Returns `Some(result)` once the gesture ends.
    fn show_selecting(&mut self, ctx: &egui::Context) -> Option<Option<SelectionRect>> {
        let mut finished = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let Some(texture) = &self.screen_texture else {
                    finished = Some(None);
                    return;
                };

                let size = texture.size();
                let image_rect = render::fit_image(ui.max_rect(), size);
                let scale = size[0] as f32 / image_rect.width().max(1.0);
                let to_pixels = |p: Pos2| {
                    (
                        (p.x - image_rect.min.x) * scale,
                        (p.y - image_rect.min.y) * scale,
                    )
                };

                let response = ui.allocate_rect(image_rect, egui::Sense::drag());
                let painter = ui.painter();
                render::paint_texture(painter, texture, image_rect);

                let drag = &mut self.state.drag;
                if response.drag_started() {
                    if let Some(origin) = ctx.input(|i| i.pointer.press_origin()) {
                        drag.press(to_pixels(origin));
                    }
                }
                if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        drag.drag_to(to_pixels(pos));
                    }
                }
                if let Some(sel) = drag.current() {
                    let min = image_rect.min + Vec2::new(sel.x, sel.y) / scale;
                    let rect = Rect::from_min_size(min, Vec2::new(sel.width, sel.height) / scale);
                    render::paint_selection(painter, rect);
                }
                if response.drag_stopped() {
                    finished = Some(drag.release());
                }

                if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                    drag.cancel();
                    finished = Some(None);
                }
            });

        finished
    }

    fn show_preview(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("capture_actions").show(ctx, |ui| {
            let (retake_clicked, save_clicked) =
                render::render_capture_actions(ui, &mut self.state);
            if save_clicked {
                self.save();
            }
            if retake_clicked {
                self.begin_selection(ctx);
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render::render_status_bar(ui, &self.state.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(texture), Some(capture)) = (&self.preview_texture, &self.state.capture)
            else {
                ui.label("ドラッグで範囲を選択してください (撮り直し)");
                return;
            };

            egui::ScrollArea::both().show(ui, |ui| {
                let size = texture.size();
                let (rect, response) = ui.allocate_exact_size(
                    Vec2::new(size[0] as f32, size[1] as f32),
                    egui::Sense::click(),
                );
                let painter = ui.painter();
                render::paint_texture(painter, texture, rect);
                render::paint_trim_rect(painter, rect, capture.trim, 1.0);

                if response.clicked_by(egui::PointerButton::Secondary)
                    || response.clicked_by(egui::PointerButton::Middle)
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

impl eframe::App for CaptureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.state.mode {
            CaptureMode::Selecting => {
                if let Some(selection) = self.show_selecting(ctx) {
                    self.finish_selection(ctx, selection);
                }
            }
            CaptureMode::Preview => self.show_preview(ctx),
        }
    }
}
