// Input configuration module
//
// Serializable key bindings, persisted to TOML alongside the rest of
// `EmulatorConfig`. `KeyCode` itself isn't `Serialize`, so bindings round
// trip through their string name (e.g. "KeyX", "ArrowUp").

use super::keyboard::KeyboardMapping;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub button_a: String,
    pub button_b: String,
    pub select: String,
    pub start: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl KeyBindings {
    pub fn to_mapping(&self) -> KeyboardMapping {
        KeyboardMapping {
            button_a: parse_key(&self.button_a).unwrap_or(KeyCode::KeyX),
            button_b: parse_key(&self.button_b).unwrap_or(KeyCode::KeyZ),
            select: parse_key(&self.select).unwrap_or(KeyCode::ShiftRight),
            start: parse_key(&self.start).unwrap_or(KeyCode::Enter),
            up: parse_key(&self.up).unwrap_or(KeyCode::ArrowUp),
            down: parse_key(&self.down).unwrap_or(KeyCode::ArrowDown),
            left: parse_key(&self.left).unwrap_or(KeyCode::ArrowLeft),
            right: parse_key(&self.right).unwrap_or(KeyCode::ArrowRight),
        }
    }

    pub fn from_mapping(mapping: &KeyboardMapping) -> Self {
        Self {
            button_a: format!("{:?}", mapping.button_a),
            button_b: format!("{:?}", mapping.button_b),
            select: format!("{:?}", mapping.select),
            start: format!("{:?}", mapping.start),
            up: format!("{:?}", mapping.up),
            down: format!("{:?}", mapping.down),
            left: format!("{:?}", mapping.left),
            right: format!("{:?}", mapping.right),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_mapping(&KeyboardMapping::default_mapping())
    }
}

fn parse_key(name: &str) -> Option<KeyCode> {
    // KeyCode has no FromStr; match the handful of names default_mapping()
    // and common customizations use. Unrecognized names fall back to the
    // caller's default rather than erroring, since a stale config file
    // should degrade gracefully, not prevent startup.
    Some(match name {
        "KeyX" => KeyCode::KeyX,
        "KeyZ" => KeyCode::KeyZ,
        "KeyA" => KeyCode::KeyA,
        "KeyS" => KeyCode::KeyS,
        "ShiftRight" => KeyCode::ShiftRight,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "Enter" => KeyCode::Enter,
        "Space" => KeyCode::Space,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_round_trip_through_mapping() {
        let bindings = KeyBindings::default();
        let mapping = bindings.to_mapping();
        assert_eq!(mapping.button_a, KeyCode::KeyX);
        assert_eq!(mapping.up, KeyCode::ArrowUp);
    }

    #[test]
    fn unknown_key_name_falls_back_to_default() {
        let mut bindings = KeyBindings::default();
        bindings.button_a = "NotARealKey".to_string();
        let mapping = bindings.to_mapping();
        assert_eq!(mapping.button_a, KeyCode::KeyX);
    }

    #[test]
    fn from_mapping_preserves_custom_binding() {
        let mapping = KeyboardMapping { button_a: KeyCode::Space, ..KeyboardMapping::default_mapping() };
        let bindings = KeyBindings::from_mapping(&mapping);
        assert_eq!(bindings.button_a, "Space");
        assert_eq!(bindings.to_mapping().button_a, KeyCode::Space);
    }
}
