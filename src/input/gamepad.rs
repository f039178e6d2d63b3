// Gamepad input mapping module
//
// Polls host gamepads through gilrs and converts the first two connected
// pads into controller states. The face-button layout follows the usual
// convention: South is A, West is B, with Select/Start on the middle
// buttons and the D-pad or left stick driving directions.

use super::Controller;
use gilrs::{Axis, Button as GilrsButton, Gamepad, Gilrs};

/// Stick deflection treated as a D-pad press
const AXIS_THRESHOLD: f32 = 0.5;

/// Gamepad input handler for the two controller ports
pub struct GamepadHandler {
    /// gilrs context; None when gamepad support failed to initialize
    gilrs: Option<Gilrs>,
}

impl GamepadHandler {
    /// Create a gamepad handler
    ///
    /// Initialization failure is downgraded to keyboard-only play with
    /// a single warning; pads are optional hardware.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                eprintln!("gamepad support unavailable: {}", e);
                None
            }
        };
        Self { gilrs }
    }

    /// Poll both ports
    ///
    /// The first connected pad feeds port 1, the second feeds port 2;
    /// missing pads read as all-released.
    pub fn poll(&mut self) -> (Controller, Controller) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return (Controller::new(), Controller::new());
        };

        // Drain the event queue so cached gamepad state is current
        while gilrs.next_event().is_some() {}

        let mut pads = gilrs.gamepads().map(|(_, pad)| read_pad(&pad));
        let pad1 = pads.next().unwrap_or_default();
        let pad2 = pads.next().unwrap_or_default();
        (pad1, pad2)
    }
}

impl Default for GamepadHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one gilrs gamepad snapshot into a controller state
fn read_pad(pad: &Gamepad) -> Controller {
    let axis_x = pad.value(Axis::LeftStickX);
    let axis_y = pad.value(Axis::LeftStickY);

    Controller {
        a: pad.is_pressed(GilrsButton::South),
        b: pad.is_pressed(GilrsButton::West),
        select: pad.is_pressed(GilrsButton::Select),
        start: pad.is_pressed(GilrsButton::Start),
        up: pad.is_pressed(GilrsButton::DPadUp) || axis_y > AXIS_THRESHOLD,
        down: pad.is_pressed(GilrsButton::DPadDown) || axis_y < -AXIS_THRESHOLD,
        left: pad.is_pressed(GilrsButton::DPadLeft) || axis_x < -AXIS_THRESHOLD,
        right: pad.is_pressed(GilrsButton::DPadRight) || axis_x > AXIS_THRESHOLD,
    }
}
