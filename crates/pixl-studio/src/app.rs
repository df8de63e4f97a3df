use anyhow::Result;

use pixl_engine::canvas::CanvasTarget;
use pixl_engine::core::{App, AppControl, FrameCtx};
use pixl_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};
use pixl_engine::paint::Color;
use pixl_engine::stroke::StrokeSession;
use pixl_engine::window::LogicalSize;

use crate::document::DocumentSettings;
use crate::palette::Palette;

/// Outcome of one input event that the session itself cannot apply.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Effect {
    None,
    Resize(LogicalSize<f64>),
    Exit,
}

/// Studio front end: owns document and palette state and turns window input
/// into stroke session calls.
pub struct StudioApp {
    document: DocumentSettings,
    palette: Palette,
    background: Color,
    color_synced: bool,
}

impl StudioApp {
    pub fn new(document: DocumentSettings) -> Self {
        let background = document.canvas_config().background;
        Self {
            document,
            palette: Palette::default(),
            background,
            color_synced: false,
        }
    }

    fn handle_event<C: CanvasTarget>(
        &mut self,
        session: &mut StrokeSession<C>,
        event: &InputEvent,
        to_canvas: impl Fn(f32, f32) -> Option<(f32, f32)>,
    ) -> Result<Effect> {
        match *event {
            InputEvent::Key { key, state: KeyState::Pressed, repeat } => {
                return self.handle_key(session, key, repeat);
            }

            InputEvent::PointerMoved(p) => {
                if let Some((x, y)) = to_canvas(p.x, p.y) {
                    session.pointer_move(x, y)?;
                }
            }

            InputEvent::PointerButton(b) if b.button == MouseButton::Left => match b.state {
                MouseButtonState::Pressed => {
                    if let Some((x, y)) = to_canvas(b.x, b.y) {
                        session.pointer_down(x, y)?;
                    }
                }
                MouseButtonState::Released => session.pointer_up(),
            },

            // No release will arrive for a button held while focus moves away.
            InputEvent::Focused(false) => session.pointer_up(),

            _ => {}
        }
        Ok(Effect::None)
    }

    fn handle_key<C: CanvasTarget>(
        &mut self,
        session: &mut StrokeSession<C>,
        key: Key,
        repeat: bool,
    ) -> Result<Effect> {
        let effect = match key {
            Key::Escape => Effect::Exit,

            Key::C if !repeat => {
                session.clear_canvas(self.background)?;
                log::debug!("canvas cleared");
                Effect::None
            }

            Key::Plus | Key::Minus => {
                let before = self.document.zoom();
                if key == Key::Plus {
                    self.document.increase_zoom();
                } else {
                    self.document.decrease_zoom();
                }
                if self.document.zoom() == before {
                    Effect::None
                } else {
                    log::debug!("zoom {}x", self.document.zoom());
                    Effect::Resize(self.document.window_size())
                }
            }

            // Digits are 1-based on the keyboard.
            other => {
                if let Some(d) = other.digit().filter(|&d| d > 0) {
                    if self.palette.select_color_by_index(d as usize - 1) {
                        session.color_changed(self.palette.current_color());
                    }
                }
                Effect::None
            }
        };
        Ok(effect)
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        if !self.color_synced {
            ctx.session.color_changed(self.palette.current_color());
            self.color_synced = true;
        }

        let window = &ctx.window;
        for event in &ctx.input_frame.events {
            let effect = self.handle_event(ctx.session, event, |x, y| window.to_canvas_space(x, y))?;
            match effect {
                Effect::None => {}
                Effect::Resize(size) => window.request_logical_size(size.width, size.height),
                Effect::Exit => return Ok(AppControl::Exit),
            }
        }

        Ok(AppControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixl_engine::canvas::CanvasConfig;
    use pixl_engine::input::{PointerButtonEvent, PointerMoveEvent};
    use pixl_engine::raster::SoftwareCanvas;

    fn fixture() -> (StudioApp, StrokeSession<SoftwareCanvas>) {
        let doc = DocumentSettings::default();
        let canvas = SoftwareCanvas::new(doc.canvas_config()).unwrap();
        (StudioApp::new(doc), StrokeSession::new(canvas))
    }

    // Window of 256x256 logical pixels.
    fn to_canvas(x: f32, y: f32) -> Option<(f32, f32)> {
        Some((x / 256.0, y / 256.0))
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn feed(
        app: &mut StudioApp,
        session: &mut StrokeSession<SoftwareCanvas>,
        events: &[InputEvent],
    ) -> Vec<Effect> {
        events
            .iter()
            .map(|e| app.handle_event(session, e, to_canvas).unwrap())
            .collect()
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn left_drag_draws_a_stroke() {
        let (mut app, mut session) = fixture();
        feed(
            &mut app,
            &mut session,
            &[left(MouseButtonState::Pressed, 0.0, 10.0), moved(128.0, 10.0)],
        );
        assert!(session.is_drawing());
        session.tick().unwrap();
        feed(&mut app, &mut session, &[left(MouseButtonState::Released, 128.0, 10.0)]);

        assert!(!session.is_drawing());
        // 10 / 256 * 128 = 5; 0..=64 across.
        let painted = session.canvas().texels_with(Color::BLACK);
        assert_eq!(painted.len(), 65);
        assert!(painted.iter().all(|t| t.y == 5));
    }

    #[test]
    fn other_buttons_do_not_draw() {
        let (mut app, mut session) = fixture();
        let right = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 1.0,
        });
        feed(&mut app, &mut session, &[right]);
        assert!(!session.is_drawing());
    }

    #[test]
    fn focus_loss_ends_the_stroke() {
        let (mut app, mut session) = fixture();
        feed(
            &mut app,
            &mut session,
            &[left(MouseButtonState::Pressed, 4.0, 4.0), InputEvent::Focused(false)],
        );
        assert!(!session.is_drawing());
        assert!(session.pending_points().is_empty());
    }

    #[test]
    fn cursor_follows_pointer_without_drawing() {
        let (mut app, mut session) = fixture();
        feed(&mut app, &mut session, &[moved(64.0, 192.0)]);
        assert_eq!(session.cursor().map(|c| (c.x, c.y)), Some((0.25, 0.75)));
        assert!(session.pending_points().is_empty());
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn digit_keys_pick_palette_colors() {
        let (mut app, mut session) = fixture();
        feed(&mut app, &mut session, &[key(Key::Digit2)]);
        assert_eq!(session.color(), Color::RED);
        feed(&mut app, &mut session, &[key(Key::Digit4)]);
        assert_eq!(session.color(), Color::BLUE);
    }

    #[test]
    fn unknown_digits_keep_the_color() {
        let (mut app, mut session) = fixture();
        feed(&mut app, &mut session, &[key(Key::Digit3), key(Key::Digit9), key(Key::Digit0)]);
        assert_eq!(session.color(), Color::GREEN);
    }

    #[test]
    fn zoom_keys_resize_until_clamped() {
        let (mut app, mut session) = fixture();
        let effects = feed(&mut app, &mut session, &[key(Key::Minus), key(Key::Minus)]);
        assert_eq!(
            effects,
            vec![Effect::Resize(LogicalSize::new(128.0, 128.0)), Effect::None]
        );
        let effects = feed(&mut app, &mut session, &[key(Key::Plus)]);
        assert_eq!(effects, vec![Effect::Resize(LogicalSize::new(256.0, 256.0))]);
    }

    #[test]
    fn c_clears_to_background() {
        let (mut app, mut session) = fixture();
        feed(
            &mut app,
            &mut session,
            &[left(MouseButtonState::Pressed, 0.0, 0.0), moved(255.0, 255.0)],
        );
        session.tick().unwrap();
        feed(&mut app, &mut session, &[left(MouseButtonState::Released, 255.0, 255.0), key(Key::C)]);
        session.tick().unwrap();
        assert!(session.canvas().texels_with(Color::BLACK).is_empty());
    }

    #[test]
    fn escape_exits() {
        let (mut app, mut session) = fixture();
        assert_eq!(feed(&mut app, &mut session, &[key(Key::Escape)]), vec![Effect::Exit]);
    }
}
