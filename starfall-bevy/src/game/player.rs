//! Player input - arrow keys to simulation input

use bevy::prelude::*;

use starfall::InputFrame;

/// Pack the arrow keys into a simulation input frame.
pub fn keyboard_frame(keyboard: &ButtonInput<KeyCode>) -> InputFrame {
    InputFrame::from_keys(
        keyboard.pressed(KeyCode::ArrowLeft),
        keyboard.pressed(KeyCode::ArrowRight),
        keyboard.pressed(KeyCode::ArrowUp),
        keyboard.pressed(KeyCode::ArrowDown),
    )
}
