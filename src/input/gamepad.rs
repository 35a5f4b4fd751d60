// Gamepad input mapping module
//
// Maps a single connected gamepad's buttons to the Game Boy's eight
// buttons. The Game Boy has only one player, so there is no assignment
// bookkeeping to do beyond picking the first connected device.

use super::Button;
use gilrs::{Button as GilrsButton, Event, EventType, Gilrs};

#[derive(Debug, Clone)]
pub struct GamepadMapping {
    pub button_a: GilrsButton,
    pub button_b: GilrsButton,
    pub select: GilrsButton,
    pub start: GilrsButton,
    pub up: GilrsButton,
    pub down: GilrsButton,
    pub left: GilrsButton,
    pub right: GilrsButton,
}

impl GamepadMapping {
    /// Standard layout: D-pad to D-pad, east face button to A, south to B.
    pub fn default_mapping() -> Self {
        Self {
            button_a: GilrsButton::East,
            button_b: GilrsButton::South,
            select: GilrsButton::Select,
            start: GilrsButton::Start,
            up: GilrsButton::DPadUp,
            down: GilrsButton::DPadDown,
            left: GilrsButton::DPadLeft,
            right: GilrsButton::DPadRight,
        }
    }

    fn get_button(&self, button: GilrsButton) -> Option<Button> {
        if button == self.button_a {
            Some(Button::A)
        } else if button == self.button_b {
            Some(Button::B)
        } else if button == self.select {
            Some(Button::Select)
        } else if button == self.start {
            Some(Button::Start)
        } else if button == self.up {
            Some(Button::Up)
        } else if button == self.down {
            Some(Button::Down)
        } else if button == self.left {
            Some(Button::Left)
        } else if button == self.right {
            Some(Button::Right)
        } else {
            None
        }
    }
}

impl Default for GamepadMapping {
    fn default() -> Self {
        Self::default_mapping()
    }
}

/// Polls `gilrs` and tracks per-button pressed state for the Game Boy's
/// eight buttons. Operates in a no-op degraded mode if no gamepad backend
/// could be initialized (e.g. a headless CI environment).
pub struct GamepadHandler {
    gilrs: Option<Gilrs>,
    mapping: GamepadMapping,
    pressed: [bool; 8],
}

impl GamepadHandler {
    pub fn new() -> Self {
        Self::with_mapping(GamepadMapping::default_mapping())
    }

    pub fn with_mapping(mapping: GamepadMapping) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(err) => {
                log::warn!("gamepad support unavailable: {}", err);
                None
            }
        };
        Self { gilrs, mapping, pressed: [false; 8] }
    }

    fn set_pressed(&mut self, button: Button, pressed: bool) {
        self.pressed[button_index(button)] = pressed;
    }

    /// Drain pending gilrs events, updating internal button state.
    pub fn poll(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else { return };
        while let Some(Event { event, .. }) = gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(mapped) = self.mapping.get_button(button) {
                        self.pressed[button_index(mapped)] = true;
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(mapped) = self.mapping.get_button(button) {
                        self.pressed[button_index(mapped)] = false;
                    }
                }
                _ => {}
            }
        }
    }

    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.pressed[button_index(button)]
    }

    pub fn set_mapping(&mut self, mapping: GamepadMapping) {
        self.mapping = mapping;
    }
}

impl Default for GamepadHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn button_index(button: Button) -> usize {
    Button::ALL.iter().position(|&b| b == button).expect("Button::ALL is exhaustive")
}
