//! Key inputs for STM32
//!
//! Key lines idle high through the internal pull-up and are pulled low
//! while pressed.

use embassy_stm32::gpio::{Input, Pin, Pull};
use embassy_stm32::Peri;
use macropad_hal::InputPin;

/// A key line with its port and pin number
pub struct KeyPin<'d> {
    input: Input<'d>,
    port: u8,
    pin: u8,
}

impl<'d> KeyPin<'d> {
    /// Configure `pin` as a pulled-up input
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let port = pin.port();
        let number = pin.pin();
        Self {
            input: Input::new(pin, Pull::Up),
            port,
            pin: number,
        }
    }

    /// Port letter (`b'A'` for GPIOA)
    pub fn port_letter(&self) -> u8 {
        b'A' + self.port
    }

    /// Pin number within the port
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl InputPin for KeyPin<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
