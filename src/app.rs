//! The application object: toolbar, canvas panel, pointer plumbing, and
//! the modal error/confirmation dialogs.

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use std::path::PathBuf;

use crate::canvas::{CanvasSurface, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::io::{self, SaveOutcome};
use crate::tools::{DrawState, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::{log_err, log_info};

pub struct EaselApp {
    state: DrawState,
    canvas: CanvasSurface,
    /// Pending export-failure dialog (the message shown to the user).
    error_dialog: Option<String>,
    /// Pending save-confirmation dialog (the path written).
    saved_dialog: Option<PathBuf>,
}

impl EaselApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            state: DrawState::new(),
            canvas: CanvasSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT),
            error_dialog: None,
            saved_dialog: None,
        }
    }

    // --- Toolbar -------------------------------------------------------

    fn toolbar_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Color button opens the picker popup; picking a color drops
            // out of eraser mode.
            ui.label("Color:");
            let mut color = self.state.active_color;
            if ui.color_edit_button_srgba(&mut color).changed() {
                self.state.color_picked(color);
            }

            ui.separator();

            // Pressed visual tracks the eraser state
            if ui
                .selectable_label(self.state.eraser_active, "Eraser")
                .clicked()
            {
                self.state.eraser_toggled();
            }

            ui.separator();

            ui.label("Brush size:");
            ui.add(egui::Slider::new(
                &mut self.state.brush_size,
                MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE,
            ));

            ui.separator();

            if ui.button("Clear").clicked() {
                self.canvas.clear();
                log_info!("canvas cleared");
            }

            if ui.button("Open Image…").clicked() {
                self.open_background();
            }

            if ui.button("Save").clicked() {
                self.save_canvas();
            }
        });
    }

    // --- Canvas --------------------------------------------------------

    fn canvas_ui(&mut self, ui: &mut egui::Ui, modal_open: bool) {
        let size = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
        let rect = Rect::from_center_size(ui.max_rect().center(), size);

        self.canvas.paint(ui, rect);
        ui.painter()
            .rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::GRAY));

        // A modal dialog blocks canvas interaction; an in-flight drag is
        // abandoned rather than resumed when the dialog closes.
        if modal_open {
            self.state.drag_released();
            return;
        }

        let pressed = ui.input(|i| i.pointer.primary_pressed());
        let down = ui.input(|i| i.pointer.primary_down());
        let released = ui.input(|i| i.pointer.primary_released());
        let hover = ui.input(|i| i.pointer.hover_pos());
        let over_floating = ui.ctx().is_pointer_over_area();
        let over_canvas = hover.is_some_and(|p| rect.contains(p));

        if over_canvas && !over_floating {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        // Drag start: record the segment origin, draw nothing yet
        if pressed
            && over_canvas
            && !over_floating
            && let Some(pos) = hover
        {
            self.state.drag_started(self.canvas.to_canvas(pos, rect));
        }

        // Drag move: connect the last recorded position to the current
        // one.  The pointer may leave the canvas mid-drag; stamps outside
        // the surface are clipped by the renderer.
        if down
            && self.state.last_pos.is_some()
            && let Some(pos) = ui.input(|i| i.pointer.latest_pos())
        {
            let canvas_pos = self.canvas.to_canvas(pos, rect);
            self.state.drag_moved(&mut self.canvas, canvas_pos);
        }

        if released {
            self.state.drag_released();
        }
    }

    // --- Export / background flows --------------------------------------

    /// The one fallible boundary: capture, prompt, write.  Cancellation is
    /// a silent no-op; any failure becomes the error dialog.
    fn save_canvas(&mut self) {
        // Snapshot before the dialog opens so the saved pixels are the
        // ones that were on screen when Save was clicked
        let snapshot = self.canvas.snapshot();
        match io::export_canvas(&snapshot) {
            Ok(SaveOutcome::Saved(path)) => {
                log_info!("drawing saved to {}", path.display());
                self.saved_dialog = Some(path);
            }
            Ok(SaveOutcome::Cancelled) => {}
            Err(e) => {
                log_err!("export failed: {}", e);
                self.error_dialog = Some(format!("Could not save image:\n{}", e));
            }
        }
    }

    fn open_background(&mut self) {
        let Some(path) = io::prompt_open_path() else {
            return;
        };
        match io::load_image(&path) {
            Ok(img) => {
                log_info!("background image loaded from {}", path.display());
                self.canvas.set_background(&img);
            }
            Err(e) => {
                log_err!("background load failed: {}", e);
                self.error_dialog = Some(format!("Could not open image:\n{}", e));
            }
        }
    }

    // --- Modal dialogs ---------------------------------------------------

    fn dialogs_ui(&mut self, ctx: &egui::Context) {
        if let Some(msg) = self.error_dialog.clone() {
            let mut close = false;
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(msg);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("  OK  ").clicked() {
                            close = true;
                        }
                    });
                });
            if close {
                self.error_dialog = None;
            }
        }

        if let Some(path) = self.saved_dialog.clone() {
            let mut close = false;
            egui::Window::new("Saved")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!("Drawing saved to:\n{}", path.display()));
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("  OK  ").clicked() {
                            close = true;
                        }
                    });
                });
            if close {
                self.saved_dialog = None;
            }
        }
    }
}

impl eframe::App for EaselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.error_dialog.is_some() || self.saved_dialog.is_some();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.toolbar_ui(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_ui(ui, modal_open);
        });

        self.dialogs_ui(ctx);
    }
}
