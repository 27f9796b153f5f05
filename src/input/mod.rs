use egui::{Context, Pos2, Rect, Vec2};

/// Phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position relative to the canvas origin
    pub position: Pos2,
    /// Movement since the previous pointer event
    pub movement: Vec2,
}

impl PointerEvent {
    pub fn down(position: Pos2) -> Self {
        Self {
            kind: PointerKind::Down,
            position,
            movement: Vec2::ZERO,
        }
    }

    pub fn moved(position: Pos2, movement: Vec2) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
            movement,
        }
    }

    pub fn up(position: Pos2) -> Self {
        Self {
            kind: PointerKind::Up,
            position,
            movement: Vec2::ZERO,
        }
    }
}

/// Handles converting raw egui input into canvas `PointerEvent`s.
///
/// Only the primary button drives gestures. Once a press starts on the
/// canvas, moves and the release are reported even outside of it.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Process this frame's egui input and generate pointer events
    pub fn process_input(&mut self, ctx: &Context, canvas: Rect) -> Vec<PointerEvent> {
        let (pressed_at, released, latest) = ctx.input(|input| {
            let pressed_at = if input.pointer.primary_pressed() {
                input.pointer.press_origin()
            } else {
                None
            };
            (
                pressed_at,
                input.pointer.primary_released(),
                input.pointer.latest_pos(),
            )
        });

        self.translate(canvas, pressed_at, latest, released)
    }

    /// Turn raw screen-space pointer observations into canvas events
    fn translate(
        &mut self,
        canvas: Rect,
        pressed_at: Option<Pos2>,
        latest: Option<Pos2>,
        released: bool,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let origin = canvas.min.to_vec2();

        if let Some(origin_pos) = pressed_at.filter(|pos| canvas.contains(*pos)) {
            self.push_move(&mut events, origin_pos, origin);
            events.push(PointerEvent::down(origin_pos - origin));
            self.pressed = true;
        }

        if let Some(pos) = latest {
            if self.pressed || canvas.contains(pos) {
                self.push_move(&mut events, pos, origin);
            } else {
                self.last_pointer_pos = None;
            }
        }

        if released && self.pressed {
            if let Some(pos) = self.last_pointer_pos {
                events.push(PointerEvent::up(pos - origin));
            }
            self.pressed = false;
        }

        events
    }

    fn push_move(&mut self, events: &mut Vec<PointerEvent>, pos: Pos2, origin: Vec2) {
        if self.last_pointer_pos == Some(pos) {
            return;
        }
        let movement = self.last_pointer_pos.map_or(Vec2::ZERO, |last| pos - last);
        events.push(PointerEvent::moved(pos - origin, movement));
        self.last_pointer_pos = Some(pos);
    }
}
