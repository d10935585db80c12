//! Interrupt-driven byte transport
//!
//! A pair of SPSC rings (inbound, outbound) and the transmit flag that
//! decides which context drains the outbound ring.

pub mod ring;
pub mod serial;

pub use ring::{ring_storage, RingBuffer, RingError};
pub use serial::{SerialTransport, TX_CHUNK};
