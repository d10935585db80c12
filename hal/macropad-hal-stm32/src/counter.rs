//! Encoder pulse counter
//!
//! A general-purpose timer in quadrature encoder mode counts edges on its
//! CH1/CH2 inputs in hardware; reading it never blocks.

use embassy_stm32::timer::qei::{Qei, QeiPin};
use embassy_stm32::timer::{Ch1, Ch2, GeneralInstance4Channel};
use embassy_stm32::Peri;
use macropad_hal::PulseCounter;

/// Timer running in encoder mode
pub struct EncoderCounter<'d, T: GeneralInstance4Channel> {
    qei: Qei<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> EncoderCounter<'d, T> {
    pub fn new(tim: Peri<'d, T>, ch1: QeiPin<'d, T, Ch1>, ch2: QeiPin<'d, T, Ch2>) -> Self {
        Self {
            qei: Qei::new(tim, ch1, ch2),
        }
    }
}

impl<T: GeneralInstance4Channel> PulseCounter for EncoderCounter<'_, T> {
    fn count(&mut self) -> u16 {
        self.qei.count()
    }
}
