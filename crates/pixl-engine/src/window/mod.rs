//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and binds the canvas surface and
//! stroke session to them.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::dpi::LogicalSize;
