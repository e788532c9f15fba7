//! Result reader window.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eframe::egui;

use super::render;
use super::state::ReaderState;
use crate::config::get_config;
use crate::reader::{ReadTarget, ReaderEvent, ResultReader};

/// Result reader application.
pub struct ReaderApp {
    state: ReaderState,
    /// `None` if the HTTP client could not be built
    reader: Option<Arc<ResultReader>>,
    /// Progress of the read in flight; `Some` while a read thread is alive
    events: Option<Receiver<ReaderEvent>>,
}

impl ReaderApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        super::setup_fonts(&cc.egui_ctx);

        let mut state = ReaderState::default();
        let reader = match ResultReader::from_config(get_config()) {
            Ok(reader) => Some(Arc::new(reader)),
            Err(e) => {
                crate::log(&format!("GUI: Failed to create result reader: {}", e));
                state.status = format!("エラー: {}", e);
                None
            }
        };

        Self {
            state,
            reader,
            events: None,
        }
    }

    fn is_busy(&self) -> bool {
        self.events.is_some() || self.reader.as_ref().is_some_and(|r| r.is_reading())
    }

    /// Starts a read on a worker thread. Dropped if one is already running.
    fn start_read(&mut self, target: ReadTarget) {
        if self.is_busy() {
            crate::log("GUI: Read already in progress; request dropped");
            return;
        }
        let Some(reader) = self.reader.clone() else {
            return;
        };

        let (sender, receiver) = channel();
        thread::spawn(move || {
            let outcome = reader.read(target, &mut |event| {
                let _ = sender.send(event);
            });
            if let Some(msg) = outcome.status_message() {
                crate::log(&format!("Read finished: {}", msg));
                let _ = sender.send(ReaderEvent::Status(msg));
            }
        });
        self.events = Some(receiver);
    }

    /// Applies progress from the read thread.
    fn poll_events(&mut self) {
        let Some(receiver) = &self.events else {
            return;
        };

        let mut received = Vec::new();
        let mut finished = false;
        loop {
            match receiver.try_recv() {
                Ok(event) => received.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }

        for event in received {
            self.state.apply(event);
        }
        if finished {
            self.events = None;
        }
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        if self.events.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render::render_status_bar(ui, &self.state.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let busy = self.is_busy();
            let (read_clicked, latest_clicked) =
                render::render_reader_controls(ui, &mut self.state, busy);

            if read_clicked {
                if let Some(target) = self.state.request_game_read() {
                    self.start_read(target);
                }
            }
            if latest_clicked {
                self.start_read(ReadTarget::Latest);
            }

            ui.add_space(8.0);
            render::render_result(ui, &mut self.state);
        });
    }
}
