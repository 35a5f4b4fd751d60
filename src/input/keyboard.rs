// Keyboard input mapping module
//
// Maps physical keys to the Game Boy's eight buttons. Unlike the NES there
// is only one player, so this is considerably simpler than the two-player
// mapping a console with detachable controllers needs.

use super::Button;
use std::collections::HashSet;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard mapping configuration.
#[derive(Debug, Clone)]
pub struct KeyboardMapping {
    pub button_a: KeyCode,
    pub button_b: KeyCode,
    pub select: KeyCode,
    pub start: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl KeyboardMapping {
    /// - Arrow keys: D-pad
    /// - X: A button
    /// - Z: B button
    /// - Enter: Start
    /// - Right Shift: Select
    pub fn default_mapping() -> Self {
        Self {
            button_a: KeyCode::KeyX,
            button_b: KeyCode::KeyZ,
            select: KeyCode::ShiftRight,
            start: KeyCode::Enter,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
        }
    }

    fn get_button(&self, key: KeyCode) -> Option<Button> {
        if key == self.button_a {
            Some(Button::A)
        } else if key == self.button_b {
            Some(Button::B)
        } else if key == self.select {
            Some(Button::Select)
        } else if key == self.start {
            Some(Button::Start)
        } else if key == self.up {
            Some(Button::Up)
        } else if key == self.down {
            Some(Button::Down)
        } else if key == self.left {
            Some(Button::Left)
        } else if key == self.right {
            Some(Button::Right)
        } else {
            None
        }
    }
}

impl Default for KeyboardMapping {
    fn default() -> Self {
        Self::default_mapping()
    }
}

/// Tracks pressed keys and resolves them through a `KeyboardMapping`.
pub struct KeyboardHandler {
    mapping: KeyboardMapping,
    pressed_keys: HashSet<KeyCode>,
}

impl KeyboardHandler {
    pub fn new() -> Self {
        Self { mapping: KeyboardMapping::default_mapping(), pressed_keys: HashSet::new() }
    }

    pub fn with_mapping(mapping: KeyboardMapping) -> Self {
        Self { mapping, pressed_keys: HashSet::new() }
    }

    pub fn handle_key_press(&mut self, physical_key: PhysicalKey) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.pressed_keys.insert(key_code);
        }
    }

    pub fn handle_key_release(&mut self, physical_key: PhysicalKey) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.pressed_keys.remove(&key_code);
        }
    }

    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.pressed_keys
            .iter()
            .any(|&key| self.mapping.get_button(key) == Some(button))
    }

    pub fn set_mapping(&mut self, mapping: KeyboardMapping) {
        self.mapping = mapping;
    }

    pub fn mapping(&self) -> &KeyboardMapping {
        &self.mapping
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_binds_arrows_and_xz() {
        let mapping = KeyboardMapping::default_mapping();
        assert_eq!(mapping.button_a, KeyCode::KeyX);
        assert_eq!(mapping.up, KeyCode::ArrowUp);
    }

    #[test]
    fn no_keys_pressed_means_no_buttons_active() {
        let handler = KeyboardHandler::new();
        for button in Button::ALL {
            assert!(!handler.is_button_pressed(button));
        }
    }

    #[test]
    fn pressing_a_key_activates_its_mapped_button() {
        let mut handler = KeyboardHandler::new();
        handler.handle_key_press(PhysicalKey::Code(KeyCode::KeyX));
        assert!(handler.is_button_pressed(Button::A));
        assert!(!handler.is_button_pressed(Button::B));
    }

    #[test]
    fn releasing_a_key_deactivates_its_button() {
        let mut handler = KeyboardHandler::new();
        handler.handle_key_press(PhysicalKey::Code(KeyCode::KeyX));
        handler.handle_key_release(PhysicalKey::Code(KeyCode::KeyX));
        assert!(!handler.is_button_pressed(Button::A));
    }

    #[test]
    fn simultaneous_presses_are_all_tracked() {
        let mut handler = KeyboardHandler::new();
        handler.handle_key_press(PhysicalKey::Code(KeyCode::KeyX));
        handler.handle_key_press(PhysicalKey::Code(KeyCode::ArrowUp));
        assert!(handler.is_button_pressed(Button::A));
        assert!(handler.is_button_pressed(Button::Up));
    }

    #[test]
    fn custom_mapping_overrides_default() {
        let mapping = KeyboardMapping { button_a: KeyCode::Space, ..KeyboardMapping::default_mapping() };
        let mut handler = KeyboardHandler::with_mapping(mapping);
        handler.handle_key_press(PhysicalKey::Code(KeyCode::Space));
        assert!(handler.is_button_pressed(Button::A));
    }
}
