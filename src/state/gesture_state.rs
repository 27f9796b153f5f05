use egui::{Pos2, Rect};

use crate::geometry::Placement;

/// Per-gesture interaction state.
///
/// One variant per mode, each carrying exactly what that mode needs. Every
/// gesture starts from `Idle` on pointer-down and returns to `Idle` on
/// pointer-up, whatever its outcome.
///
/// ```text
///                  ┌──────────────────────┐
///            ┌─────► DrawingBox           ├─────┐
///            │     └──────────────────────┘     │
///            │     ┌──────────────────────┐     │
///            ├─────► DrawingPolygonVertex ├─────┤
///            │     └──────────────────────┘     │
/// ┌──────┐   │     ┌──────────────────────┐     │   ┌──────┐
/// │ Idle ├───┼─────► DraggingBody         ├─────┼───► Idle │
/// └──────┘   │     └──────────────────────┘     │   └──────┘
///            │     ┌──────────────────────┐     │
///            ├─────► DraggingVertex       ├─────┤
///            │     └──────────────────────┘     │
///            │     ┌──────────────────────┐     │
///            └─────► Resizing             ├─────┘
///                  └──────────────────────┘
///    pointer-down                            pointer-up
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No button held
    #[default]
    Idle,
    /// Pressed on empty canvas; becomes a box on drag or a polygon vertex on click
    DrawingBox {
        anchor: Pos2,
        /// Whether `DrawStarted` has fired for this gesture
        started: bool,
    },
    /// Pressed while a polygon is open
    DrawingPolygonVertex { anchor: Pos2 },
    DraggingBody { index: usize, anchor: Pos2 },
    DraggingVertex {
        index: usize,
        vertex: usize,
        anchor: Pos2,
    },
    Resizing {
        index: usize,
        /// The box as it was at pointer-down; all resize math is relative to it
        snapshot: Rect,
        placement: Placement,
        anchor: Pos2,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            GestureState::DrawingBox { .. } | GestureState::DrawingPolygonVertex { .. }
        )
    }

    /// Position of the pointer-down that started this gesture
    pub fn anchor(&self) -> Option<Pos2> {
        match *self {
            GestureState::Idle => None,
            GestureState::DrawingBox { anchor, .. }
            | GestureState::DrawingPolygonVertex { anchor }
            | GestureState::DraggingBody { anchor, .. }
            | GestureState::DraggingVertex { anchor, .. }
            | GestureState::Resizing { anchor, .. } => Some(anchor),
        }
    }

    /// Index of the shape this gesture manipulates, if any
    pub fn target_index(&self) -> Option<usize> {
        match *self {
            GestureState::DraggingBody { index, .. }
            | GestureState::DraggingVertex { index, .. }
            | GestureState::Resizing { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "Idle",
            GestureState::DrawingBox { .. } => "DrawingBox",
            GestureState::DrawingPolygonVertex { .. } => "DrawingPolygonVertex",
            GestureState::DraggingBody { .. } => "DraggingBody",
            GestureState::DraggingVertex { .. } => "DraggingVertex",
            GestureState::Resizing { .. } => "Resizing",
        }
    }
}
