use egui::{Color32, Pos2, Rect};
use log::{debug, info, warn};

use crate::config::EditorConfig;
use crate::element::{self, Element, PolygonShape, Shape, ShapeKind, BoxShape, MIN_POLYGON_VERTICES};
use crate::event::EditorEvent;
use crate::geometry::{hit_test, resize_rect, Affordance, HitResult, HitTarget};
use crate::input::PointerEvent;
use crate::palette::Palette;
use crate::state::GestureState;

/// Live outline of a shape being drawn
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Box { rect: Rect, color: Color32 },
    /// Buffered vertices plus the pointer as a trailing vertex
    Polygon { points: Vec<Pos2>, color: Color32 },
}

/// The pointer-driven gesture state machine.
///
/// Owns the per-gesture state, the open polygon buffer and the last hit-test
/// result. Shapes are owned by the caller and passed in per event. Each
/// handler returns the notifications it produced, in order.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    state: GestureState,
    /// Result of the last idle hit-test; selects the mode on pointer-down
    hover: HitResult,
    /// Cursor to show; diverges from `hover` while a resize flips direction
    cursor: Affordance,
    polygon: Vec<Pos2>,
    last_pointer: Option<Pos2>,
    palette: Palette,
    current_color: Color32,
}

impl Default for ShapeTool {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl ShapeTool {
    pub fn new(palette: Palette) -> Self {
        Self {
            state: GestureState::Idle,
            hover: HitResult::default(),
            cursor: Affordance::Crosshair,
            polygon: Vec::new(),
            last_pointer: None,
            palette,
            current_color: Color32::RED,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn hover(&self) -> HitResult {
        self.hover
    }

    pub fn cursor(&self) -> Affordance {
        self.cursor
    }

    pub fn current_color(&self) -> Color32 {
        self.current_color
    }

    /// Vertices of the polygon currently being drawn
    pub fn polygon_in_progress(&self) -> &[Pos2] {
        &self.polygon
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Dispatch a pointer event to the matching handler
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        shapes: &mut Vec<Shape>,
        config: &EditorConfig,
    ) -> Vec<EditorEvent> {
        use crate::input::PointerKind;

        match event.kind {
            PointerKind::Down => self.on_pointer_down(event, shapes),
            PointerKind::Move => self.on_pointer_move(event, shapes, config),
            PointerKind::Up => self.on_pointer_up(event, shapes, config),
        }
    }

    /// Choose the gesture mode from the last hit-test result
    pub fn on_pointer_down(&mut self, event: &PointerEvent, shapes: &[Shape]) -> Vec<EditorEvent> {
        if !self.state.is_idle() {
            warn!("Pointer down during {}; ignoring", self.state.name());
            return Vec::new();
        }

        let anchor = event.position;
        self.last_pointer = Some(anchor);

        // A stale hover may point past the end after a delete
        let target = match self.hover.target.shape_index() {
            Some(index) if index >= shapes.len() => HitTarget::None,
            _ => self.hover.target,
        };

        self.state = match target {
            HitTarget::None if !self.polygon.is_empty() => {
                GestureState::DrawingPolygonVertex { anchor }
            }
            HitTarget::None => {
                self.current_color = self.palette.next_color();
                GestureState::DrawingBox {
                    anchor,
                    started: false,
                }
            }
            HitTarget::Body { index } => GestureState::DraggingBody { index, anchor },
            HitTarget::Vertex { index, vertex } => GestureState::DraggingVertex {
                index,
                vertex,
                anchor,
            },
            HitTarget::Edge { index, placement } => match &shapes[index] {
                Shape::Box(b) => GestureState::Resizing {
                    index,
                    snapshot: b.rect(),
                    placement,
                    anchor,
                },
                Shape::Polygon(_) => GestureState::DraggingBody { index, anchor },
            },
        };

        debug!("Pointer down at {:?} -> {}", anchor, self.state.name());
        Vec::new()
    }

    pub fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        shapes: &mut [Shape],
        config: &EditorConfig,
    ) -> Vec<EditorEvent> {
        let pos = event.position;
        self.last_pointer = Some(pos);
        let mut events = Vec::new();

        match &mut self.state {
            GestureState::Idle => {
                let hover = hit_test(pos, shapes, config.edge_band_width, config.vertex_radius);
                if hover.affordance != self.hover.affordance {
                    debug!("Affordance {:?} -> {:?}", self.hover.affordance, hover.affordance);
                }
                self.hover = hover;
                self.cursor = hover.affordance;
                // The open polygon's preview trails the pointer
                if !self.polygon.is_empty() {
                    events.push(EditorEvent::DrawingProgress);
                }
            }
            GestureState::DrawingBox { anchor, started } => {
                if !*started && pos != *anchor {
                    *started = true;
                    events.push(EditorEvent::DrawStarted { kind: ShapeKind::Box });
                }
                events.push(EditorEvent::DrawingProgress);
            }
            GestureState::DrawingPolygonVertex { .. } => {
                events.push(EditorEvent::DrawingProgress);
            }
            GestureState::DraggingBody { index, .. } => {
                let index = *index;
                if let Some(shape) = shapes.get_mut(index) {
                    shape.translate(event.movement);
                    events.push(EditorEvent::Dragging {
                        shape: shape.clone(),
                        index,
                    });
                }
            }
            GestureState::DraggingVertex { index, vertex, .. } => {
                let (index, vertex) = (*index, *vertex);
                if let Some(Shape::Polygon(polygon)) = shapes.get_mut(index) {
                    if vertex < polygon.points().len() {
                        let moved = polygon.vertex(vertex) + event.movement;
                        polygon.mutate_vertex(vertex, moved);
                    }
                }
                if let Some(shape) = shapes.get(index) {
                    events.push(EditorEvent::SizeChanged {
                        shape: shape.clone(),
                        index,
                        vertex: Some(vertex),
                    });
                }
            }
            GestureState::Resizing {
                index,
                snapshot,
                placement,
                anchor,
            } => {
                let index = *index;
                let step = resize_rect(*snapshot, *placement, *anchor, pos);
                if let Some(Shape::Box(b)) = shapes.get_mut(index) {
                    b.set_rect(step.from, step.to);
                }
                self.cursor = Affordance::Resize(step.direction);
                if let Some(shape) = shapes.get(index) {
                    events.push(EditorEvent::SizeChanged {
                        shape: shape.clone(),
                        index,
                        vertex: None,
                    });
                }
            }
        }

        events
    }

    /// Finish the gesture. The state is back to `Idle` before any of the
    /// returned events reach a handler.
    pub fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        shapes: &mut Vec<Shape>,
        config: &EditorConfig,
    ) -> Vec<EditorEvent> {
        let pos = event.position;
        self.last_pointer = Some(pos);
        let finished = std::mem::take(&mut self.state);
        let mut events = Vec::new();

        match finished {
            GestureState::Idle => {}
            GestureState::DrawingBox { anchor, started } => {
                if pos == anchor && !started {
                    self.polygon_click(pos, shapes, config, &mut events);
                } else if pos.x != anchor.x && pos.y != anchor.y {
                    self.commit(
                        Shape::Box(BoxShape::new(anchor, pos, self.current_color)),
                        shapes,
                        &mut events,
                    );
                } else {
                    warn!("Rejecting zero-area box from {:?} to {:?}", anchor, pos);
                }
            }
            GestureState::DrawingPolygonVertex { anchor } => {
                if pos == anchor {
                    self.polygon_click(pos, shapes, config, &mut events);
                } else {
                    debug!("Ignoring drag while a polygon is open");
                }
            }
            GestureState::Resizing {
                index,
                snapshot,
                anchor,
                ..
            } => {
                if let Some(Shape::Box(b)) = shapes.get_mut(index) {
                    if b.is_degenerate() {
                        warn!("Resize of #{} ended with zero area; restoring {:?}", index, snapshot);
                        b.set_rect(snapshot.min, snapshot.max);
                        events.push(EditorEvent::SizeChanged {
                            shape: shapes[index].clone(),
                            index,
                            vertex: None,
                        });
                    }
                }
                Self::click_select(pos, anchor, index, shapes, &mut events);
            }
            GestureState::DraggingBody { index, anchor }
            | GestureState::DraggingVertex { index, anchor, .. } => {
                Self::click_select(pos, anchor, index, shapes, &mut events);
            }
        }

        debug!("Pointer up at {:?}; gesture reset to Idle", pos);
        self.refresh_hover(pos, shapes, config);
        events
    }

    /// A press and release on the same spot selects the pressed shape
    fn click_select(
        pos: Pos2,
        anchor: Pos2,
        index: usize,
        shapes: &mut [Shape],
        events: &mut Vec<EditorEvent>,
    ) {
        if pos != anchor || index >= shapes.len() {
            return;
        }
        element::select_only(shapes, index);
        events.push(EditorEvent::Clicked {
            shape: shapes[index].clone(),
            index,
        });
        events.push(EditorEvent::SelectionChanged { index });
    }

    /// Handle a click on empty canvas or on an open polygon
    fn polygon_click(
        &mut self,
        pos: Pos2,
        shapes: &mut Vec<Shape>,
        config: &EditorConfig,
        events: &mut Vec<EditorEvent>,
    ) {
        let Some(&first) = self.polygon.first() else {
            self.polygon.push(pos);
            events.push(EditorEvent::DrawStarted {
                kind: ShapeKind::Polygon,
            });
            return;
        };

        if pos.distance(first) > config.vertex_radius {
            self.polygon.push(pos);
            return;
        }

        let vertices = std::mem::take(&mut self.polygon);
        if vertices.len() < MIN_POLYGON_VERTICES {
            warn!(
                "Discarding polygon closed with {} vertices (need {})",
                vertices.len(),
                MIN_POLYGON_VERTICES
            );
            events.push(EditorEvent::PolygonCancelled);
            return;
        }

        self.commit(
            Shape::Polygon(PolygonShape::new(vertices, self.current_color)),
            shapes,
            events,
        );
    }

    fn commit(&mut self, shape: Shape, shapes: &mut Vec<Shape>, events: &mut Vec<EditorEvent>) {
        shapes.push(shape);
        let index = shapes.len() - 1;
        element::select_only(shapes, index);
        info!(
            "Committed {} #{} with {} points",
            shapes[index].kind().as_str(),
            index,
            shapes[index].points().len()
        );
        events.push(EditorEvent::DrawEnded {
            shape: shapes[index].clone(),
            shapes: shapes.clone(),
        });
    }

    fn refresh_hover(&mut self, pos: Pos2, shapes: &[Shape], config: &EditorConfig) {
        self.hover = hit_test(pos, shapes, config.edge_band_width, config.vertex_radius);
        self.cursor = self.hover.affordance;
    }

    /// Discard the open polygon, if any
    pub fn cancel_polygon(&mut self) -> bool {
        if self.polygon.is_empty() {
            return false;
        }
        info!("Cancelled polygon with {} vertices", self.polygon.len());
        self.polygon.clear();
        if matches!(self.state, GestureState::DrawingPolygonVertex { .. }) {
            self.state = GestureState::Idle;
        }
        true
    }

    /// Drop the active gesture and the cached hit-test, keeping the open polygon.
    /// Used after the shape collection changes underneath the tool.
    pub fn reset_gesture(&mut self) {
        if !self.state.is_drawing() {
            self.state = GestureState::Idle;
        }
        self.hover = HitResult::default();
        self.cursor = Affordance::Crosshair;
    }

    /// Forget all transient state
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.hover = HitResult::default();
        self.cursor = Affordance::Crosshair;
        self.polygon.clear();
        self.last_pointer = None;
    }

    /// Outline of the shape being drawn, if there is one to show
    pub fn preview(&self) -> Option<Preview> {
        let pointer = self.last_pointer?;
        if !self.polygon.is_empty() {
            let mut points = self.polygon.clone();
            points.push(pointer);
            return Some(Preview::Polygon {
                points,
                color: self.current_color,
            });
        }
        match self.state {
            GestureState::DrawingBox {
                anchor,
                started: true,
            } => Some(Preview::Box {
                rect: Rect::from_two_pos(anchor, pointer),
                color: self.current_color,
            }),
            _ => None,
        }
    }
}
