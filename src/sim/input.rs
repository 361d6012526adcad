//! Logical input interface
//!
//! The input collaborator owns key capture and maps its many physical keys
//! (arrows, letter alternates) onto three logical buttons. The simulation
//! only ever queries the merged state, it never mutates it.

use serde::{Deserialize, Serialize};

/// Logical buttons the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
    Shoot,
}

/// Read-only view of the current input state, injected once per frame.
pub trait InputState {
    fn is_pressed(&self, button: Button) -> bool;
}

/// Plain value implementation of [`InputState`] for drivers and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl ButtonState {
    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
            Button::Shoot => self.shoot = pressed,
        }
    }
}

impl InputState for ButtonState {
    fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Shoot => self.shoot,
        }
    }
}
