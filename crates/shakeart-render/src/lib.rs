//! ShakeArt Render Library
//!
//! Frame compositing for ShakeArt canvases. The compositor draws through the
//! [`RasterSurface`] trait; a CPU surface is always available and the default
//! `vello-renderer` feature adds a Vello scene backend.

mod compositor;
mod pixel;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use compositor::{Compositor, FrameStats};
pub use pixel::{PixelSurface, RasterFrame};
pub use renderer::{LineCap, LineJoin, RasterSurface, RenderContext, RenderResult, RendererError, SegmentStyle};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
