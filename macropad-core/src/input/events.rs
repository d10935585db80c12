//! Input event types

use core::fmt;

/// Encoder rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Clockwise,
    Anticlockwise,
}

impl Rotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Clockwise => "clockwise",
            Rotation::Anticlockwise => "anticlockwise",
        }
    }
}

/// Logical state of a key line
///
/// Lines idle high through a pull-up, so a low level reads as pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    #[default]
    Released,
    Pressed,
}

impl KeyState {
    pub fn from_level(is_high: bool) -> Self {
        if is_high {
            KeyState::Released
        } else {
            KeyState::Pressed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyState::Released => "released",
            KeyState::Pressed => "pressed",
        }
    }
}

/// GPIO line identity: port letter and pin number (e.g. `PA0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineId {
    pub port: u8,
    pub pin: u8,
}

impl LineId {
    pub const fn new(port: u8, pin: u8) -> Self {
        Self { port, pin }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port as char, self.pin)
    }
}

/// Events produced by a scan tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Key line at this index went from pressed to released
    KeyReleased(u8),
    /// Encoder count moved
    Rotated(Rotation),
}

/// Receives events from the input engine
pub trait EventSink {
    fn on_event(&mut self, event: InputEvent);
}

impl<F: FnMut(InputEvent)> EventSink for F {
    fn on_event(&mut self, event: InputEvent) {
        self(event)
    }
}
