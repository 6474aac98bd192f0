//! Keyboard and mouse state collected from winit events.
//!
//! Keys are tracked as a set of held physical key codes. Mouse movement is
//! accumulated from raw device motion and handed out once per frame through
//! [`InputState::take_x_change`] and [`InputState::take_y_change`].

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Default)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    x_change: f32,
    y_change: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a key event. Returns the key code if it was just pressed.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<KeyCode> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.handle_key(code, event.state)
    }

    pub fn handle_key(&mut self, code: KeyCode, state: ElementState) -> Option<KeyCode> {
        match state {
            ElementState::Pressed => self.keys.insert(code).then_some(code),
            ElementState::Released => {
                self.keys.remove(&code);
                None
            }
        }
    }

    /// Accumulate raw mouse motion. Moving the mouse up yields a positive y change.
    pub fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.x_change += dx as f32;
        self.y_change -= dy as f32;
    }

    pub fn keys(&self) -> &HashSet<KeyCode> {
        &self.keys
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }

    /// Horizontal movement since the last call.
    pub fn take_x_change(&mut self) -> f32 {
        std::mem::take(&mut self.x_change)
    }

    /// Vertical movement since the last call.
    pub fn take_y_change(&mut self) -> f32 {
        std::mem::take(&mut self.y_change)
    }

    /// Forget everything, e.g. when the window loses focus and release events would be missed.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.x_change = 0.0;
        self.y_change = 0.0;
    }
}
