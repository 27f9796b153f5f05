#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod state;
pub mod tools;

pub use app::ShapeEditorApp;
pub use config::EditorConfig;
pub use editor::Editor;
pub use element::{factory, BoxShape, Element, PolygonShape, Shape, ShapeKind};
pub use error::{EditorError, EditorResult};
pub use event::{EditorEvent, EventBus, EventHandler, FnHandler};
pub use geometry::{Affordance, HitResult, HitTarget, Placement, ResizeDirection};
pub use input::{InputHandler, PointerEvent, PointerKind};
pub use palette::Palette;
pub use renderer::{EguiSurface, Surface};
pub use state::GestureState;
pub use tools::{Preview, ShapeTool};
