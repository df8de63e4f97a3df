//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the host
//! application: the `App` callbacks and the per-frame context that hands out
//! the stroke session.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
