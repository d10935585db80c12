//! Character to HID usage mapping (US layout)

use macropad_hal::REPORT_LEN;

/// Left shift modifier bit
pub const MOD_LSHIFT: u8 = 0x02;

const KEY_A: u8 = 0x04;
const KEY_1: u8 = 0x1E;
const KEY_0: u8 = 0x27;
const KEY_ENTER: u8 = 0x28;
const KEY_SPACE: u8 = 0x2C;
const KEY_DOT: u8 = 0x37;
const KEY_SLASH: u8 = 0x38;

/// Map a character to `(modifier, keycode)`
///
/// Characters with no mapping give `(0, 0)`.
pub fn encode(ch: char) -> (u8, u8) {
    match ch {
        'a'..='z' => (0, KEY_A + (ch as u8 - b'a')),
        'A'..='Z' => (MOD_LSHIFT, KEY_A + (ch as u8 - b'A')),
        '1'..='9' => (0, KEY_1 + (ch as u8 - b'1')),
        '0' => (0, KEY_0),
        ' ' => (0, KEY_SPACE),
        '.' => (0, KEY_DOT),
        '\n' => (0, KEY_ENTER),
        '!' => (MOD_LSHIFT, KEY_1),
        '?' => (MOD_LSHIFT, KEY_SLASH),
        _ => (0, 0),
    }
}

/// Boot-protocol keyboard report: modifier, reserved, six key slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyReport {
    pub modifier: u8,
    pub keycode: u8,
}

impl KeyReport {
    /// All keys up
    pub const RELEASE: Self = Self {
        modifier: 0,
        keycode: 0,
    };

    pub fn press(ch: char) -> Self {
        let (modifier, keycode) = encode(ch);
        Self { modifier, keycode }
    }

    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        [self.modifier, 0, self.keycode, 0, 0, 0, 0, 0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(encode('a'), (0, 4));
        assert_eq!(encode('z'), (0, 29));
        assert_eq!(encode('A'), (MOD_LSHIFT, 4));
        assert_eq!(encode('W'), (MOD_LSHIFT, 26));
    }

    #[test]
    fn test_digits_and_punctuation() {
        assert_eq!(encode('1'), (0, 30));
        assert_eq!(encode('9'), (0, 38));
        assert_eq!(encode('0'), (0, 39));
        assert_eq!(encode(' '), (0, 44));
        assert_eq!(encode('.'), (0, 55));
        assert_eq!(encode('\n'), (0, 40));
        assert_eq!(encode('!'), (MOD_LSHIFT, 30));
        assert_eq!(encode('?'), (MOD_LSHIFT, 56));
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(encode('#'), (0, 0));
        assert_eq!(encode('é'), (0, 0));
    }

    #[test]
    fn test_report_layout() {
        assert_eq!(KeyReport::press('H').to_bytes(), [2, 0, 11, 0, 0, 0, 0, 0]);
        assert_eq!(KeyReport::RELEASE.to_bytes(), [0; REPORT_LEN]);
    }
}
