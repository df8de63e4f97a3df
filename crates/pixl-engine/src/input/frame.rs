use super::types::InputEvent;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (focus, pointer position).
/// `InputFrame` provides this frame's events in arrival order; pointer and key
/// events interleave, so consumers walk `events` rather than summary sets.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
