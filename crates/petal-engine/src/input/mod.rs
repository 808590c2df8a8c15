//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events through [`platform::winit`].

mod frame;
mod state;
mod types;

pub(crate) mod platform;

pub use frame::InputFrame;
pub(crate) use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
