//! Board-agnostic core logic for the macropad firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Interrupt-driven serial transport (SPSC rings, transmit flag)
//! - Line console with a command table
//! - Input event engine (key edges, encoder direction)
//! - HID keycode table and typist
//! - Keymap and status screen
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod hid;
pub mod input;
pub mod keymap;
pub mod screen;
pub mod transport;
