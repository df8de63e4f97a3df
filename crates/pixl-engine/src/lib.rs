//! Pixl engine crate.
//!
//! GPU pixel-art canvas: a fixed-size texel grid that strokes are rasterized
//! into by a compute pass and presented, with a cursor highlight, by a render
//! pass. `stroke::StrokeSession` is the entry point; `window::Runtime` hosts
//! one in a winit window.

pub mod canvas;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod render;
pub mod stroke;
pub mod window;
