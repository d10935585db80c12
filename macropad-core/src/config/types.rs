//! Configuration type definitions
//!
//! Defaults reproduce the stock keypad: 115200 baud console with the prompt
//! on row 22, five keys plus the encoder, 15 ms between HID reports.

use heapless::String;
use macropad_hal::uart::{DataBits, Parity, StopBits, UartConfig};

/// Maximum length of a keymap string
pub const MAX_TEXT_LEN: usize = 32;

/// Maximum number of key lines
pub const MAX_KEYS: usize = 8;

/// Complete keypad configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacropadConfig {
    pub transport: TransportConfig,
    pub console: ConsoleConfig,
    pub input: InputConfig,
    pub hid: HidConfig,
    pub keymap: KeymapConfig,
}

impl MacropadConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Serial transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportConfig {
    /// Inbound ring size in bytes
    pub rx_capacity: u16,
    /// Outbound ring size in bytes
    pub tx_capacity: u16,
    /// Largest single UART transfer
    pub tx_chunk: u16,
    pub baudrate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl TransportConfig {
    /// Serial line settings for the UART driver
    pub fn uart_config(&self) -> UartConfig {
        UartConfig {
            baudrate: self.baudrate,
            data_bits: self.data_bits,
            parity: self.parity,
            stop_bits: self.stop_bits,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            rx_capacity: 256,
            tx_capacity: 1024,
            tx_chunk: 64,
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Console screen layout (1-based terminal rows and columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    pub prompt_row: u16,
    pub prompt_col: u16,
    pub message_row: u16,
    pub message_col: u16,
    /// Message line is padded with spaces to this many columns
    pub message_width: u16,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt_row: 22,
            prompt_col: 3,
            message_row: 23,
            message_col: 3,
            message_width: 76,
        }
    }
}

/// Input scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Period of the scan tick
    pub scan_interval_ms: u32,
    /// Encoder deltas above this are taken at face value
    pub direction_threshold: u16,
    /// Ticks a new key level must persist before it is accepted (0 = off)
    pub debounce_ticks: u8,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: 10,
            direction_threshold: 20,
            debounce_ticks: 0,
        }
    }
}

/// HID typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidConfig {
    /// Delay after each press and each release report
    pub report_delay_ms: u32,
}

impl Default for HidConfig {
    fn default() -> Self {
        Self {
            report_delay_ms: 15,
        }
    }
}

/// Strings typed for each input event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeymapConfig {
    /// Text per key line, by index; `None` reports an unknown key
    pub keys: [Option<String<MAX_TEXT_LEN>>; MAX_KEYS],
    pub clockwise: String<MAX_TEXT_LEN>,
    pub anticlockwise: String<MAX_TEXT_LEN>,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        let mut keys: [Option<String<MAX_TEXT_LEN>>; MAX_KEYS] = Default::default();
        let stock = ["stuff", "wibble", "This is key four", "Hello World", "Rotary"];
        for (slot, text) in keys.iter_mut().zip(stock) {
            *slot = String::try_from(text).ok();
        }

        Self {
            keys,
            clockwise: String::try_from("up").unwrap_or_default(),
            anticlockwise: String::try_from("down").unwrap_or_default(),
        }
    }
}
