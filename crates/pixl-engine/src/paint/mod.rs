//! Color types shared by the canvas, stroke controller and hosts.

mod color;

pub use color::Color;
