//! STM32-specific HAL for the macropad firmware
//!
//! This crate provides STM32 implementations of the `macropad-hal` traits
//! over `embassy-stm32` peripherals:
//!
//! - [`KeyPin`] - pulled-up key input implementing `InputPin`
//! - [`EncoderCounter`] - timer in encoder mode implementing `PulseCounter`
//! - [`usart_config`] / [`UartBusError`] - UART setup and error conversion
//!
//! # Features
//!
//! - `stm32f411ce` - STM32F411CE (Black Pill)
//! - `stm32f401cc` - STM32F401CC
//! - `defmt` - Enable debug formatting support
//!
//! The firmware selects the chip feature; peripheral ownership stays with
//! the firmware, which passes embassy drivers into these wrappers.

#![no_std]
#![deny(unsafe_code)]

pub mod counter;
pub mod gpio;
pub mod uart;

pub use counter::EncoderCounter;
pub use gpio::KeyPin;
pub use uart::{usart_config, UartBusError};
