use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use eframe::egui::{self, Slider};
use log::warn;

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::element::{Element, Shape};
use crate::event::{EditorEvent, FnHandler};
use crate::input::InputHandler;
use crate::renderer::EguiSurface;

const EVENT_LOG_LEN: usize = 12;

/// Desktop host for the shape editor
pub struct ShapeEditorApp {
    editor: Editor,
    input: InputHandler,
    /// Most recent notifications, newest first
    event_log: Arc<Mutex<VecDeque<String>>>,
}

impl Default for ShapeEditorApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl ShapeEditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous settings (if any).
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<EditorConfig>(storage, eframe::APP_KEY))
            .filter(|config| match config.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!("Ignoring stored settings: {}", err);
                    false
                }
            })
            .unwrap_or_default();
        Self::with_config(config)
    }

    fn with_config(config: EditorConfig) -> Self {
        let editor = Editor::new(config).unwrap_or_else(|err| {
            warn!("{}; using default settings", err);
            Editor::default()
        });
        let event_log = Arc::new(Mutex::new(VecDeque::with_capacity(EVENT_LOG_LEN)));

        let log_sink = Arc::clone(&event_log);
        editor.subscribe(Box::new(FnHandler::new(move |event: &EditorEvent| {
            // Per-move notifications would flood the list
            if matches!(event, EditorEvent::DrawingProgress) {
                return;
            }
            if let Ok(mut log) = log_sink.lock() {
                log.push_front(describe_event(event));
                log.truncate(EVENT_LOG_LEN);
            }
        })));

        Self {
            editor,
            input: InputHandler::new(),
            event_log,
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Shapes");
        ui.label(format!("Mode: {}", self.editor.gesture().name()));
        if !self.editor.polygon_in_progress().is_empty() {
            ui.label(format!(
                "Polygon: {} vertices (Esc to cancel)",
                self.editor.polygon_in_progress().len()
            ));
        }
        ui.separator();

        let mut select = None;
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                for (index, shape) in self.editor.shapes().iter().enumerate() {
                    if ui
                        .selectable_label(shape.is_selected(), describe_shape(index, shape))
                        .clicked()
                    {
                        select = Some(index);
                    }
                }
            });
        if let Some(index) = select {
            if let Err(err) = self.editor.set_selected(index) {
                warn!("{}", err);
            }
        }

        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.editor.selected_index().is_some(), egui::Button::new("Delete"))
                .clicked()
            {
                self.editor.delete_selected();
            }
            if ui
                .add_enabled(!self.editor.is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                self.editor.clear();
            }
            if ui
                .add_enabled(
                    !self.editor.polygon_in_progress().is_empty(),
                    egui::Button::new("Cancel polygon"),
                )
                .clicked()
            {
                self.editor.cancel_polygon();
            }
        });

        ui.separator();
        ui.heading("Settings");
        let mut config = self.editor.config().clone();
        ui.add(Slider::new(&mut config.vertex_radius, 2.0..=20.0).text("Vertex radius"));
        ui.add(Slider::new(&mut config.edge_band_width, 2.0..=30.0).text("Edge band"));
        ui.add(Slider::new(&mut config.min_hue_distance, 0.0..=170.0).text("Hue distance"));
        ui.add(Slider::new(&mut config.border_width, 0.5..=8.0).text("Border width"));
        if &config != self.editor.config() {
            if let Err(err) = self.editor.set_config(config) {
                warn!("{}", err);
            }
        }

        ui.separator();
        ui.heading("Events");
        if let Ok(log) = self.event_log.lock() {
            for line in log.iter() {
                ui.monospace(line);
            }
        }
    }
}

impl eframe::App for ShapeEditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.editor.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (escape, delete) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Delete),
            )
        });
        if escape {
            self.editor.cancel_polygon();
        }
        if delete {
            self.editor.delete_selected();
        }

        egui::SidePanel::left("shapes_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas = response.rect;

            for event in self.input.process_input(ctx, canvas) {
                self.editor.handle_pointer(event);
            }

            let owns_cursor = response.hovered() || self.input.is_pressed();
            let mut surface = EguiSurface::new(&painter, canvas, ui.visuals().extreme_bg_color)
                .with_cursor(owns_cursor);
            self.editor.draw(&mut surface);
        });

        if self.editor.take_redraw() {
            ctx.request_repaint();
        }
    }
}

fn describe_shape(index: usize, shape: &Shape) -> String {
    match shape {
        Shape::Box(b) => format!(
            "#{} box {:.0}x{:.0} at ({:.0}, {:.0})",
            index,
            b.width(),
            b.height(),
            b.x(),
            b.y()
        ),
        Shape::Polygon(p) => format!("#{} polygon, {} vertices", index, p.points().len()),
    }
}

fn describe_event(event: &EditorEvent) -> String {
    match event {
        EditorEvent::DrawStarted { kind } => format!("draw started: {}", kind.as_str()),
        EditorEvent::DrawEnded { shapes, .. } => {
            format!("draw ended: {} shapes", shapes.len())
        }
        EditorEvent::Dragging { index, .. } => format!("dragging #{}", index),
        EditorEvent::SizeChanged {
            index,
            vertex: Some(vertex),
            ..
        } => format!("size changed #{} vertex {}", index, vertex),
        EditorEvent::SizeChanged { index, .. } => format!("size changed #{}", index),
        EditorEvent::Clicked { index, .. } => format!("clicked #{}", index),
        EditorEvent::SelectionChanged { index } => format!("selected #{}", index),
        EditorEvent::ShapeDeleted { index } => format!("deleted #{}", index),
        other => other.name().to_string(),
    }
}
