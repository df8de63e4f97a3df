//! Stroke session control.
//!
//! `StrokeSession` turns pointer/color/draw-state input into rasterize and
//! composite work on a [`CanvasTarget`](crate::canvas::CanvasTarget), one
//! submitted batch per tick.

mod pending;
mod session;

pub use pending::PendingSegments;
pub use session::StrokeSession;
