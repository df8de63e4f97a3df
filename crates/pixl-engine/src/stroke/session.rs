use crate::canvas::CanvasTarget;
use crate::coords::CanvasPoint;
use crate::device::SessionError;
use crate::paint::Color;

use super::PendingSegments;

/// Per-session drawing state and the per-frame driver.
///
/// Owns the canvas target plus all transient state: cursor, active color,
/// draw-active flag and the pending segment buffer. Every method takes
/// `&mut self`; input handling and `tick` must run on one logical thread.
///
/// Frame contract: `tick` encodes the rasterize pass (if points are pending)
/// strictly before the composite pass and submits both as one batch, so a
/// segment drawn this frame is visible in this frame's image.
pub struct StrokeSession<C> {
    canvas: C,
    pending: PendingSegments,
    cursor: Option<CanvasPoint>,
    color: Color,
    drawing: bool,
}

impl<C: CanvasTarget> StrokeSession<C> {
    pub fn new(canvas: C) -> Self {
        let pending = PendingSegments::new(canvas.batch_capacity());
        Self {
            canvas,
            pending,
            cursor: None,
            color: Color::BLACK,
            drawing: false,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn cursor(&self) -> Option<CanvasPoint> {
        self.cursor
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points accumulated since the last rasterize pass.
    pub fn pending_points(&self) -> &[CanvasPoint] {
        self.pending.as_slice()
    }

    // ── state setters ─────────────────────────────────────────────────────

    /// Sets the color used for strokes and the cursor highlight.
    pub fn set_color(&mut self, color: Color) {
        self.color = color.clamped();
    }

    /// Moves the cursor; while drawing, also extends the stroke.
    ///
    /// Coordinates are clamped into `[0, 1]`; non-finite ones are ignored.
    /// A full pending buffer is rasterized into the current frame before the
    /// new point is accepted, which is the only way this can fail.
    pub fn set_cursor_position(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        let point = CanvasPoint::new(x, y);
        if !point.is_finite() {
            log::debug!("ignoring non-finite cursor position ({x}, {y})");
            return Ok(());
        }
        let point = point.clamped();

        if self.drawing {
            if self.pending.is_full() {
                self.flush()?;
            }
            self.pending.push(point);
        }
        self.cursor = Some(point);
        Ok(())
    }

    /// Enters draw-active state.
    ///
    /// Pending points are kept, so the first move extends from the previous
    /// cursor position.
    pub fn start_stroke(&mut self) {
        self.drawing = true;
    }

    /// Leaves draw-active state and discards points not yet rasterized.
    ///
    /// A tap that never reaches a tick leaves no mark.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
        self.pending.clear();
    }

    /// Fills the canvas with `color` as part of the current frame.
    ///
    /// Unrasterized points and the carried-over anchor are dropped; a stroke
    /// still held continues from the next cursor update.
    pub fn clear_canvas(&mut self, color: Color) -> Result<(), SessionError> {
        self.canvas.clear(color.clamped())?;
        self.pending.clear();
        Ok(())
    }

    // ── frame driver ──────────────────────────────────────────────────────

    /// Runs one frame: rasterize pending points, composite, submit.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        if !self.pending.is_empty() {
            self.flush()?;
        }
        self.canvas.composite(self.cursor, self.color)?;
        self.canvas.submit_frame()
    }

    fn flush(&mut self) -> Result<(), SessionError> {
        self.canvas
            .rasterize_segments(self.pending.as_slice(), self.color)?;
        self.pending.retain_anchor();
        Ok(())
    }

    // ── collaborator adapters ─────────────────────────────────────────────

    /// Pointer pressed at normalized canvas coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        self.start_stroke();
        self.set_cursor_position(x, y)
    }

    /// Pointer moved to normalized canvas coordinates.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        self.set_cursor_position(x, y)
    }

    pub fn pointer_up(&mut self) {
        self.end_stroke();
    }

    pub fn color_changed(&mut self, color: Color) {
        self.set_color(color);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::canvas::CanvasConfig;
    use crate::coords::Texel;
    use crate::raster::{Pass, SoftwareCanvas};

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn session(w: u32, h: u32) -> StrokeSession<SoftwareCanvas> {
        StrokeSession::new(SoftwareCanvas::new(CanvasConfig::new(w, h)).unwrap())
    }

    fn session_with_capacity(w: u32, h: u32, cap: usize) -> StrokeSession<SoftwareCanvas> {
        let cfg = CanvasConfig::new(w, h).with_batch_capacity(cap);
        StrokeSession::new(SoftwareCanvas::new(cfg).unwrap())
    }

    fn painted(s: &StrokeSession<SoftwareCanvas>, color: Color) -> BTreeSet<Texel> {
        s.canvas().texels_with(color).into_iter().collect()
    }

    // ── setters ───────────────────────────────────────────────────────────

    #[test]
    fn moves_while_idle_only_move_cursor() {
        let mut s = session(8, 8);
        s.set_cursor_position(0.2, 0.3).unwrap();
        assert_eq!(s.cursor(), Some(CanvasPoint::new(0.2, 0.3)));
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn moves_while_drawing_append_points() {
        let mut s = session(8, 8);
        s.start_stroke();
        s.set_cursor_position(0.1, 0.1).unwrap();
        s.set_cursor_position(0.2, 0.2).unwrap();
        assert_eq!(s.pending_points().len(), 2);
    }

    #[test]
    fn cursor_is_clamped_and_nan_ignored() {
        let mut s = session(8, 8);
        s.set_cursor_position(-0.5, 3.0).unwrap();
        assert_eq!(s.cursor(), Some(CanvasPoint::new(0.0, 1.0)));
        s.set_cursor_position(f32::NAN, 0.5).unwrap();
        assert_eq!(s.cursor(), Some(CanvasPoint::new(0.0, 1.0)));
    }

    #[test]
    fn color_is_clamped() {
        let mut s = session(2, 2);
        s.set_color(Color::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(s.color(), Color::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn start_stroke_keeps_pending_points() {
        let mut s = session(8, 8);
        s.start_stroke();
        s.set_cursor_position(0.1, 0.1).unwrap();
        s.start_stroke();
        assert_eq!(s.pending_points().len(), 1);
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn tick_rasterizes_before_compositing_in_one_batch() {
        let mut s = session(8, 8);
        s.pointer_down(0.1, 0.1).unwrap();
        s.pointer_move(0.9, 0.1).unwrap();
        s.tick().unwrap();
        assert_eq!(
            s.canvas().last_batch(),
            &[Pass::Rasterize { points: 2 }, Pass::Composite]
        );
        assert_eq!(s.canvas().frames_submitted(), 1);
    }

    #[test]
    fn tick_keeps_last_point_as_anchor() {
        let mut s = session(8, 8);
        s.pointer_down(0.1, 0.1).unwrap();
        s.pointer_move(0.5, 0.5).unwrap();
        s.pointer_move(0.9, 0.1).unwrap();
        s.tick().unwrap();
        assert_eq!(s.pending_points(), &[CanvasPoint::new(0.9, 0.1)]);
    }

    #[test]
    fn idle_tick_only_composites() {
        let mut s = session(4, 4);
        s.tick().unwrap();
        assert_eq!(s.canvas().last_batch(), &[Pass::Composite]);
    }

    #[test]
    fn full_buffer_is_flushed_before_accepting_more() {
        let mut s = session_with_capacity(32, 32, 3);
        s.pointer_down(0.0, 0.5).unwrap();
        s.pointer_move(0.1, 0.5).unwrap();
        s.pointer_move(0.2, 0.5).unwrap();
        assert_eq!(s.pending_points().len(), 3);

        s.pointer_move(0.3, 0.5).unwrap();
        assert_eq!(
            s.pending_points(),
            &[CanvasPoint::new(0.2, 0.5), CanvasPoint::new(0.3, 0.5)]
        );

        s.tick().unwrap();
        assert_eq!(
            s.canvas().last_batch(),
            &[
                Pass::Rasterize { points: 3 },
                Pass::Rasterize { points: 2 },
                Pass::Composite
            ]
        );
        // x = 0.0 .. 0.3 on a 32-wide canvas: texels 0..=9 in row 16.
        let want: BTreeSet<_> = (0..=9).map(|x| Texel::new(x, 16)).collect();
        assert_eq!(painted(&s, Color::BLACK), want);
    }

    #[test]
    fn stroke_across_ticks_is_continuous() {
        let mut across = session(32, 32);
        across.pointer_down(0.05, 0.05).unwrap();
        across.pointer_move(0.4, 0.2).unwrap();
        across.tick().unwrap();
        across.pointer_move(0.7, 0.9).unwrap();
        across.tick().unwrap();
        across.pointer_up();

        let mut single = session(32, 32);
        single.pointer_down(0.05, 0.05).unwrap();
        single.pointer_move(0.4, 0.2).unwrap();
        single.pointer_move(0.7, 0.9).unwrap();
        single.tick().unwrap();
        single.pointer_up();

        assert_eq!(painted(&across, Color::BLACK), painted(&single, Color::BLACK));
    }

    // ── end_stroke ────────────────────────────────────────────────────────

    #[test]
    fn tap_without_tick_leaves_no_mark() {
        let mut s = session(4, 4);
        s.pointer_down(0.5, 0.5).unwrap();
        s.pointer_up();
        s.tick().unwrap();
        assert!(s.canvas().texels().iter().all(|&t| t == WHITE));
        assert!(s.pending_points().is_empty());
        assert!(!s.is_drawing());
    }

    #[test]
    fn end_stroke_discards_unrasterized_points() {
        let mut s = session(16, 16);
        s.pointer_down(0.0, 0.0).unwrap();
        s.pointer_move(1.0, 0.0).unwrap();
        s.pointer_up();
        s.tick().unwrap();
        assert!(painted(&s, Color::BLACK).is_empty());
    }

    #[test]
    fn new_stroke_does_not_connect_to_previous_one() {
        let mut s = session(16, 16);
        s.pointer_down(0.0, 0.0).unwrap();
        s.pointer_move(0.2, 0.0).unwrap();
        s.tick().unwrap();
        s.pointer_up();

        s.pointer_down(0.0, 0.9).unwrap();
        s.pointer_move(0.2, 0.9).unwrap();
        s.tick().unwrap();
        s.pointer_up();

        // Nothing between the two rows.
        assert!(painted(&s, Color::BLACK).iter().all(|t| t.y == 0 || t.y == 14));
    }

    #[test]
    fn clear_canvas_resets_texels() {
        let mut s = session(4, 4);
        s.pointer_down(0.0, 0.0).unwrap();
        s.pointer_move(1.0, 1.0).unwrap();
        s.tick().unwrap();
        s.clear_canvas(Color::WHITE).unwrap();
        s.tick().unwrap();
        assert!(s.canvas().texels().iter().all(|&t| t == WHITE));
        assert!(s.is_drawing());
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn clear_while_held_keeps_only_the_new_segment() {
        let mut s = session(16, 16);
        s.pointer_down(0.0, 0.0).unwrap();
        s.pointer_move(1.0, 0.0).unwrap();
        s.tick().unwrap();
        s.clear_canvas(Color::WHITE).unwrap();

        s.pointer_move(0.0, 0.5).unwrap();
        s.pointer_move(1.0, 0.5).unwrap();
        s.tick().unwrap();

        let want: BTreeSet<_> = (0..16).map(|x| Texel::new(x, 8)).collect();
        assert_eq!(painted(&s, Color::BLACK), want);
    }

    // ── held pointer ──────────────────────────────────────────────────────

    #[test]
    fn held_still_pointer_stamps_one_texel() {
        let mut s = session(8, 8);
        s.pointer_down(0.3, 0.6).unwrap();
        for _ in 0..4 {
            s.tick().unwrap();
            assert_eq!(s.pending_points(), &[CanvasPoint::new(0.3, 0.6)]);
        }
        assert_eq!(s.canvas().texels_with(Color::BLACK), vec![Texel::new(2, 4)]);
        assert_eq!(s.canvas().last_batch(), &[Pass::Rasterize { points: 1 }, Pass::Composite]);
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn red_diagonal_on_four_by_four() {
        let mut s = session(4, 4);
        s.color_changed(Color::RED);
        s.pointer_down(0.0, 0.0).unwrap();
        s.pointer_move(1.0, 1.0).unwrap();
        s.tick().unwrap();
        s.pointer_up();

        let want: BTreeSet<_> = (0..4).map(|i| Texel::new(i, i)).collect();
        assert_eq!(painted(&s, Color::RED), want);
        assert_eq!(s.canvas().texels_with(Color::WHITE).len(), 12);
    }

    #[test]
    fn single_texel_stroke_in_green() {
        let mut s = session(4, 4);
        s.set_color(Color::GREEN);
        s.pointer_down(0.375, 0.375).unwrap();
        s.pointer_move(0.4, 0.4).unwrap();
        s.tick().unwrap();
        s.pointer_up();

        assert_eq!(s.canvas().texels_with(Color::GREEN), vec![Texel::new(1, 1)]);
        assert!(!s.is_drawing());
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn cursor_highlight_follows_cursor_without_residue() {
        let mut s = session(4, 4);
        s.set_color(Color::BLUE);

        s.set_cursor_position(0.1, 0.1).unwrap();
        s.tick().unwrap();
        assert_eq!(s.canvas().presented_texel(0, 0), Some([0, 0, 255, 255]));

        s.set_cursor_position(0.9, 0.6).unwrap();
        s.tick().unwrap();
        assert_eq!(s.canvas().presented_texel(3, 2), Some([0, 0, 255, 255]));
        assert_eq!(s.canvas().presented_texel(0, 0), Some(WHITE));
        assert!(s.canvas().texels().iter().all(|&t| t == WHITE));
    }

    #[test]
    fn composite_ticks_leave_canvas_untouched() {
        let mut s = session(8, 8);
        s.pointer_down(0.1, 0.2).unwrap();
        s.pointer_move(0.8, 0.7).unwrap();
        s.tick().unwrap();
        s.pointer_up();
        let committed = s.canvas().texels().to_vec();

        for i in 0..10 {
            s.set_cursor_position(i as f32 / 10.0, 0.5).unwrap();
            s.tick().unwrap();
            assert_eq!(s.canvas().texels(), &committed[..]);
        }
    }
}
