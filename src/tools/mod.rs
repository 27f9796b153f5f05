// Gesture handling for the shape canvas
mod shape_tool;

pub use shape_tool::{Preview, ShapeTool};
