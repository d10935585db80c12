//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::{String, Vec};

use macropad_core::hid::PENDING_TEXT_LEN;
use macropad_core::transport::TX_CHUNK;

/// Queue depth for strings waiting to be typed
const TYPE_CHANNEL_SIZE: usize = 4;

/// One UART transfer handed from the transport to the TX task
pub type TxChunk = Vec<u8, TX_CHUNK>;

/// Text to type over USB HID (keymap output, merged while the typist is busy)
pub static TYPE_CHANNEL: Channel<
    CriticalSectionRawMutex,
    String<PENDING_TEXT_LEN>,
    TYPE_CHANNEL_SIZE,
> = Channel::new();

/// Transfer in flight to the UART
///
/// The transport's transmit flag admits one transfer at a time, so a single
/// slot is enough.
pub static TX_CHUNKS: Channel<CriticalSectionRawMutex, TxChunk, 1> = Channel::new();
