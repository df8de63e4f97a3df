use crate::coords::{CanvasPoint, CanvasSize};
use crate::device::SessionError;
use crate::paint::Color;

/// Canvas operations the stroke controller drives each frame.
///
/// Implemented by the GPU [`CanvasSurface`](super::CanvasSurface) and by the
/// CPU [`SoftwareCanvas`](crate::raster::SoftwareCanvas). Encoding calls
/// accumulate into one batch that [`submit_frame`](Self::submit_frame)
/// releases; within a batch, calls execute in encoding order.
pub trait CanvasTarget {
    /// Canvas dimensions in texels.
    fn size(&self) -> CanvasSize;

    /// Maximum points the controller should buffer before flushing.
    fn batch_capacity(&self) -> usize;

    /// Writes `color` into every texel covered by the consecutive segments of
    /// `points`. The first point only connects to itself.
    fn rasterize_segments(&mut self, points: &[CanvasPoint], color: Color) -> Result<(), SessionError>;

    /// Draws the canvas plus a one-texel highlight in `color` at `cursor`
    /// into the frame's output image. Never modifies the canvas.
    fn composite(&mut self, cursor: Option<CanvasPoint>, color: Color) -> Result<(), SessionError>;

    /// Fills the whole canvas with `color`.
    fn clear(&mut self, color: Color) -> Result<(), SessionError>;

    /// Submits everything encoded since the previous submit as one batch.
    fn submit_frame(&mut self) -> Result<(), SessionError>;
}
