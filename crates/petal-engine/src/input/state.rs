use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers, PointerButtonEvent, PointerMoveEvent};

/// What the platform layer needs to remember between events.
///
/// winit reports neither modifiers nor a position with key and button
/// events, so both are tracked here and attached during translation.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Pointer position in logical pixels; `None` until the pointer enters.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Applies `ev` to the tracked state and queues it on `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,

            InputEvent::PointerButton(PointerButtonEvent { x, y, modifiers, .. }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
            }
        }

        frame.push_event(ev);
    }
}
