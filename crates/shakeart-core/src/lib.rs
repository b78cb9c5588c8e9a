//! ShakeArt Core Library
//!
//! Platform-agnostic stroke model, shake generator, undo history and input
//! routing for the ShakeArt drawing tool.

pub mod canvas;
pub mod color;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod shake;
pub mod store;
pub mod stroke;
pub mod tools;

pub use canvas::Canvas;
pub use color::{ColorError, StrokeColor};
pub use config::{CanvasConfig, ConfigError};
pub use history::{History, Snapshot};
pub use input::{KeyIntent, Modifiers, MouseButton, PointerEvent, Viewport};
pub use shake::{ShakeGenerator, frame_interval};
pub use store::StrokeStore;
pub use stroke::{DEPTH_BEHIND, Stroke, StrokeId, StrokeStyle};
pub use tools::{ToolKind, ToolSettings};

pub use kurbo::Point;
