// Unified input handler module
//
// Merges keyboard and gamepad state with OR logic and applies the result
// directly to a `Joypad`, so either input source (or both at once) can
// drive the console.

use super::gamepad::GamepadHandler;
use super::keyboard::KeyboardHandler;
use super::{Button, Joypad};
use winit::keyboard::PhysicalKey;

pub struct UnifiedInput {
    keyboard: KeyboardHandler,
    gamepad: GamepadHandler,
}

impl UnifiedInput {
    pub fn new() -> Self {
        Self { keyboard: KeyboardHandler::new(), gamepad: GamepadHandler::new() }
    }

    pub fn with_handlers(keyboard: KeyboardHandler, gamepad: GamepadHandler) -> Self {
        Self { keyboard, gamepad }
    }

    pub fn handle_key_press(&mut self, physical_key: PhysicalKey) {
        self.keyboard.handle_key_press(physical_key);
    }

    pub fn handle_key_release(&mut self, physical_key: PhysicalKey) {
        self.keyboard.handle_key_release(physical_key);
    }

    pub fn poll_gamepads(&mut self) {
        self.gamepad.poll();
    }

    fn is_pressed(&self, button: Button) -> bool {
        self.keyboard.is_button_pressed(button) || self.gamepad.is_button_pressed(button)
    }

    /// Push the merged input state into the console's joypad register.
    pub fn apply_to(&self, joypad: &mut Joypad) {
        for button in Button::ALL {
            joypad.set_button(button, self.is_pressed(button));
        }
    }

    pub fn keyboard(&self) -> &KeyboardHandler {
        &self.keyboard
    }

    pub fn gamepad(&self) -> &GamepadHandler {
        &self.gamepad
    }
}

impl Default for UnifiedInput {
    fn default() -> Self {
        Self::new()
    }
}
