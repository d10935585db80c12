//! Maps input events to the text typed for them

use crate::config::KeymapConfig;
use crate::input::{InputEvent, Rotation};

/// Event to text lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    config: KeymapConfig,
}

impl Keymap {
    pub fn new(config: KeymapConfig) -> Self {
        Self { config }
    }

    /// Text for `event`, or `None` for a key with no mapping
    pub fn text_for(&self, event: &InputEvent) -> Option<&str> {
        let text = match event {
            InputEvent::KeyReleased(index) => self.config.keys.get(*index as usize)?.as_ref()?,
            InputEvent::Rotated(Rotation::Clockwise) => &self.config.clockwise,
            InputEvent::Rotated(Rotation::Anticlockwise) => &self.config.anticlockwise,
        };
        Some(text.as_str())
    }

    pub fn config(&self) -> &KeymapConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.text_for(&InputEvent::KeyReleased(0)), Some("stuff"));
        assert_eq!(keymap.text_for(&InputEvent::KeyReleased(1)), Some("wibble"));
        assert_eq!(
            keymap.text_for(&InputEvent::KeyReleased(3)),
            Some("Hello World")
        );
        assert_eq!(keymap.text_for(&InputEvent::KeyReleased(4)), Some("Rotary"));
        assert_eq!(
            keymap.text_for(&InputEvent::Rotated(Rotation::Clockwise)),
            Some("up")
        );
        assert_eq!(
            keymap.text_for(&InputEvent::Rotated(Rotation::Anticlockwise)),
            Some("down")
        );
    }

    #[test]
    fn test_unknown_key() {
        let keymap = Keymap::default();
        assert_eq!(keymap.text_for(&InputEvent::KeyReleased(5)), None);
        assert_eq!(keymap.text_for(&InputEvent::KeyReleased(200)), None);
    }
}
