//! CPU rasterization.
//!
//! `walk` holds the segment walk shared in behavior with `raster.wgsl`;
//! `SoftwareCanvas` runs it on a texel buffer behind the same
//! [`CanvasTarget`](crate::canvas::CanvasTarget) seam as the GPU canvas.

mod software;
mod walk;

pub use software::{Pass, SoftwareCanvas};
pub use walk::{split_batches, walk_batch, walk_segment};
