//! Macropad Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The board-agnostic logic in `macropad-core` is
//! written against these traits only, so it runs unchanged on the target
//! and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (macropad-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  macropad-core (console, input engine)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  macropad-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ macropad-hal- │
//!             │    stm32      │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Discrete key inputs
//! - [`counter::PulseCounter`] - Free-running quadrature counter
//! - [`uart::UartTx`] - Interrupt-driven serial transmit
//! - [`hid::HidReportSink`] - USB keyboard report output

#![no_std]
#![deny(unsafe_code)]

pub mod counter;
pub mod gpio;
pub mod hid;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use counter::PulseCounter;
pub use gpio::InputPin;
pub use hid::{HidReportSink, REPORT_LEN};
pub use uart::{UartConfig, UartTx};
