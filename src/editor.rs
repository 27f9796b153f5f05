use egui::{Pos2, Vec2};
use log::{info, warn};

use crate::config::EditorConfig;
use crate::element::{self, Element, Shape};
use crate::error::{EditorError, EditorResult};
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::geometry::Affordance;
use crate::input::PointerEvent;
use crate::palette::Palette;
use crate::renderer::{render_preview, render_shapes, Surface};
use crate::state::GestureState;
use crate::tools::ShapeTool;

/// The shape editor: owns the shape collection and routes pointer events
/// through the gesture machine.
///
/// Notifications are delivered synchronously through the event bus after the
/// gesture machine has finished updating its own state.
#[derive(Debug)]
pub struct Editor {
    shapes: Vec<Shape>,
    tool: ShapeTool,
    config: EditorConfig,
    events: EventBus,
    needs_redraw: bool,
}

impl Default for Editor {
    fn default() -> Self {
        let config = EditorConfig::default();
        let palette = Palette::new(config.min_hue_distance);
        Self::with_palette(config, palette)
    }
}

impl Editor {
    /// Creates an editor, rejecting a config that fails validation
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        let palette = Palette::new(config.min_hue_distance);
        Ok(Self::with_palette(config, palette))
    }

    /// Editor with a deterministic color sequence
    pub fn with_seed(config: EditorConfig, seed: u64) -> EditorResult<Self> {
        config.validate()?;
        let palette = Palette::with_seed(config.min_hue_distance, seed);
        Ok(Self::with_palette(config, palette))
    }

    fn with_palette(config: EditorConfig, palette: Palette) -> Self {
        Self {
            shapes: Vec::new(),
            tool: ShapeTool::new(palette),
            config,
            events: EventBus::new(),
            needs_redraw: true,
        }
    }

    // ---- pointer input ----

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let events = self
            .tool
            .handle_pointer(&event, &mut self.shapes, &self.config);
        self.needs_redraw = true;
        self.emit_all(events);
    }

    pub fn pointer_down(&mut self, position: Pos2) {
        self.handle_pointer(PointerEvent::down(position));
    }

    pub fn pointer_move(&mut self, position: Pos2, movement: Vec2) {
        self.handle_pointer(PointerEvent::moved(position, movement));
    }

    pub fn pointer_up(&mut self, position: Pos2) {
        self.handle_pointer(PointerEvent::up(position));
    }

    fn emit_all(&self, events: Vec<EditorEvent>) {
        for event in events {
            self.events.emit(event);
        }
    }

    // ---- mutation ----

    /// Remove every shape and all transient gesture state
    pub fn clear(&mut self) {
        let removed = self.shapes.len();
        self.shapes.clear();
        self.tool.reset();
        self.needs_redraw = true;
        info!("Cleared {} shapes", removed);
        self.events.emit(EditorEvent::Cleared);
    }

    /// Remove the shape at `index`; later shapes shift down by one
    pub fn delete(&mut self, index: usize) -> EditorResult<Shape> {
        if let Err(err) = EditorError::check_index(index, self.shapes.len()) {
            warn!("delete: {}", err);
            return Err(err);
        }
        let shape = self.shapes.remove(index);
        self.tool.reset_gesture();
        self.needs_redraw = true;
        info!("Deleted {} #{}", shape.kind().as_str(), index);
        self.events.emit(EditorEvent::ShapeDeleted { index });
        Ok(shape)
    }

    /// Select the shape at `index`, deselecting all others
    pub fn set_selected(&mut self, index: usize) -> EditorResult<()> {
        if let Err(err) = EditorError::check_index(index, self.shapes.len()) {
            warn!("set_selected: {}", err);
            return Err(err);
        }
        element::select_only(&mut self.shapes, index);
        self.needs_redraw = true;
        self.events.emit(EditorEvent::SelectionChanged { index });
        Ok(())
    }

    /// Delete whichever shape is selected, if any
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let index = self.selected_index()?;
        self.delete(index).ok()
    }

    /// Discard the polygon being drawn. Returns whether one was open.
    pub fn cancel_polygon(&mut self) -> bool {
        let cancelled = self.tool.cancel_polygon();
        if cancelled {
            self.needs_redraw = true;
            self.events.emit(EditorEvent::PolygonCancelled);
        }
        cancelled
    }

    /// Append a shape without going through a gesture
    pub fn push_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.tool.reset_gesture();
        self.needs_redraw = true;
        self.shapes.len() - 1
    }

    pub fn set_config(&mut self, config: EditorConfig) -> EditorResult<()> {
        config.validate()?;
        self.tool.palette_mut().set_min_distance(config.min_hue_distance);
        self.config = config;
        self.needs_redraw = true;
        Ok(())
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    // ---- queries ----

    /// Index of the first selected shape
    pub fn selected_index(&self) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.is_selected())
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> EditorResult<&Shape> {
        EditorError::check_index(index, self.shapes.len())?;
        Ok(&self.shapes[index])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Cursor hint for the current pointer position or active gesture
    pub fn affordance(&self) -> Affordance {
        self.tool.cursor()
    }

    pub fn gesture(&self) -> &GestureState {
        self.tool.state()
    }

    pub fn polygon_in_progress(&self) -> &[Pos2] {
        self.tool.polygon_in_progress()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ---- rendering ----

    /// Repaint the whole canvas: shapes, the live preview, then the cursor
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        render_shapes(surface, &self.shapes, &self.config);
        if let Some(preview) = self.tool.preview() {
            render_preview(surface, &preview, &self.config);
        }
        surface.set_cursor(self.tool.cursor());
    }

    /// Whether anything changed since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
