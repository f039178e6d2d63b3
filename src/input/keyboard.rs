// Keyboard input mapping module
//
// Maps winit key events onto the player-1 controller. The bindings are
// the hand-on-keyboard layout: WASD for the D-pad, K for A, J for B,
// Q for Select, E for Start.

use super::Controller;
use winit::keyboard::KeyCode;

/// Keyboard mapping for one controller
#[derive(Debug, Clone)]
pub struct KeyboardMapping {
    /// Key for A button
    pub button_a: KeyCode,
    /// Key for B button
    pub button_b: KeyCode,
    /// Key for Select button
    pub select: KeyCode,
    /// Key for Start button
    pub start: KeyCode,
    /// Key for Up on D-pad
    pub up: KeyCode,
    /// Key for Down on D-pad
    pub down: KeyCode,
    /// Key for Left on D-pad
    pub left: KeyCode,
    /// Key for Right on D-pad
    pub right: KeyCode,
}

impl KeyboardMapping {
    /// The default player-1 layout
    pub fn player1_default() -> Self {
        Self {
            button_a: KeyCode::KeyK,
            button_b: KeyCode::KeyJ,
            select: KeyCode::KeyQ,
            start: KeyCode::KeyE,
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
        }
    }
}

impl Default for KeyboardMapping {
    fn default() -> Self {
        Self::player1_default()
    }
}

/// Tracks the keyboard-driven controller state across key events
pub struct KeyboardHandler {
    mapping: KeyboardMapping,
    state: Controller,
}

impl KeyboardHandler {
    /// Create a handler with the default player-1 mapping
    pub fn new() -> Self {
        Self {
            mapping: KeyboardMapping::player1_default(),
            state: Controller::new(),
        }
    }

    /// Create a handler with a custom mapping
    pub fn with_mapping(mapping: KeyboardMapping) -> Self {
        Self {
            mapping,
            state: Controller::new(),
        }
    }

    /// Apply a key press or release
    ///
    /// Returns true when the key was bound to a controller button.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let m = &self.mapping;
        let slot = if key == m.button_a {
            &mut self.state.a
        } else if key == m.button_b {
            &mut self.state.b
        } else if key == m.select {
            &mut self.state.select
        } else if key == m.start {
            &mut self.state.start
        } else if key == m.up {
            &mut self.state.up
        } else if key == m.down {
            &mut self.state.down
        } else if key == m.left {
            &mut self.state.left
        } else if key == m.right {
            &mut self.state.right
        } else {
            return false;
        };
        *slot = pressed;
        true
    }

    /// The current keyboard-driven controller state
    pub fn state(&self) -> Controller {
        self.state
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}
