use winit::dpi::LogicalSize;
use winit::window::{Window, WindowId};

use crate::canvas::CanvasSurface;
use crate::input::{InputFrame, InputState};
use crate::stroke::StrokeSession;
use crate::window::RuntimeCtx;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys  = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    /// Maps a logical-pixel position to normalized canvas coordinates.
    ///
    /// The canvas fills the whole window, so this is a division by the
    /// logical size. Returns `None` while the window has no area.
    pub fn to_canvas_space(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        normalize((x, y), self.logical_size())
    }

    /// Asks the platform to resize the window's client area.
    ///
    /// The request may be ignored or adjusted; the resulting `Resized` event
    /// reconfigures the surface.
    pub fn request_logical_size(&self, width: f64, height: f64) {
        let _ = self.window.request_inner_size(LogicalSize::new(width, height));
    }
}

fn normalize((x, y): (f32, f32), (w, h): (f32, f32)) -> Option<(f32, f32)> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some((x / w, y / h))
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `CanvasSurface<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:       WindowCtx<'a>,
    pub session:      &'a mut StrokeSession<CanvasSurface<'w>>,
    pub input:        &'a InputState,
    pub input_frame:  &'a InputFrame,
    pub runtime:      &'a mut RuntimeCtx,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_by_logical_size() {
        assert_eq!(normalize((64.0, 32.0), (256.0, 128.0)), Some((0.25, 0.25)));
    }

    #[test]
    fn zero_area_window_has_no_canvas_space() {
        assert_eq!(normalize((1.0, 1.0), (0.0, 10.0)), None);
    }

    #[test]
    fn outside_positions_are_left_for_the_session_to_clamp() {
        assert_eq!(normalize((-8.0, 300.0), (100.0, 100.0)), Some((-0.08, 3.0)));
    }
}
