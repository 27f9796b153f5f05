use crate::element::{Shape, ShapeKind};

/// Notifications fired by the editor while it processes pointer input and
/// facade operations. Delivered synchronously through the `EventBus`.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A new box drag or polygon began; fired once per draw
    DrawStarted { kind: ShapeKind },
    /// A shape was committed to the collection
    DrawEnded { shape: Shape, shapes: Vec<Shape> },
    /// The live preview of an in-progress draw changed
    DrawingProgress,
    /// A shape's body was dragged
    Dragging { shape: Shape, index: usize },
    /// A box was resized or a polygon vertex moved
    SizeChanged {
        shape: Shape,
        index: usize,
        vertex: Option<usize>,
    },
    /// A shape was pressed and released without moving
    Clicked { shape: Shape, index: usize },
    SelectionChanged { index: usize },
    ShapeDeleted { index: usize },
    Cleared,
    /// An open polygon was discarded without being committed
    PolygonCancelled,
}

impl EditorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditorEvent::DrawStarted { .. } => "draw_started",
            EditorEvent::DrawEnded { .. } => "draw_ended",
            EditorEvent::DrawingProgress => "drawing",
            EditorEvent::Dragging { .. } => "dragging",
            EditorEvent::SizeChanged { .. } => "size_changed",
            EditorEvent::Clicked { .. } => "clicked",
            EditorEvent::SelectionChanged { .. } => "selection_changed",
            EditorEvent::ShapeDeleted { .. } => "shape_deleted",
            EditorEvent::Cleared => "cleared",
            EditorEvent::PolygonCancelled => "polygon_cancelled",
        }
    }
}
