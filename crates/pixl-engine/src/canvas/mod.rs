//! Canvas surface management.
//!
//! The canvas is a fixed-size `Rgba8Unorm` texel grid. `CanvasTarget` is the
//! seam the stroke controller drives; `CanvasSurface` is the GPU
//! implementation, owning the device, the presentation surface, the canvas
//! texture and both passes.

mod config;
mod surface;
mod target;

pub use config::{CanvasConfig, DEFAULT_BATCH_CAPACITY};
pub use surface::CanvasSurface;
pub use target::CanvasTarget;
