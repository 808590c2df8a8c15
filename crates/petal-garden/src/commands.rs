use petal_engine::coords::Vec2;
use petal_engine::input::{InputEvent, InputFrame, Key, KeyState, MouseButton, MouseButtonState};
use petal_engine::target::VectorFormat;

/// Something the user asked the garden to do.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    /// Grow a flower at this logical position.
    Plant(Vec2),
    Clear,
    Export(VectorFormat),
    ToggleFullscreen,
    Quit,
}

impl Command {
    /// Key bindings: `F` fullscreen, `X` clear, `S`/`E`/`P`/`D` export
    /// SVG/EPS/PS/PDF, `Escape` quit.
    pub fn from_key(key: Key) -> Option<Self> {
        let cmd = match key {
            Key::F => Command::ToggleFullscreen,
            Key::X => Command::Clear,
            Key::S => Command::Export(VectorFormat::Svg),
            Key::E => Command::Export(VectorFormat::Eps),
            Key::P => Command::Export(VectorFormat::Ps),
            Key::D => Command::Export(VectorFormat::Pdf),
            Key::Escape => Command::Quit,
            _ => return None,
        };
        Some(cmd)
    }

    pub fn from_event(ev: &InputEvent) -> Option<Self> {
        match ev {
            InputEvent::PointerButton(b)
                if b.button == MouseButton::Left && b.state == MouseButtonState::Pressed =>
            {
                Some(Command::Plant(Vec2::new(b.x, b.y)))
            }
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                modifiers,
                repeat: false,
            } => {
                // Leave shortcut chords to the platform.
                if modifiers.ctrl || modifiers.alt || modifiers.meta {
                    return None;
                }
                Self::from_key(*key)
            }
            _ => None,
        }
    }
}

/// Commands carried by this frame's events, in arrival order.
pub fn commands(frame: &InputFrame) -> Vec<Command> {
    frame.events.iter().filter_map(Command::from_event).collect()
}
