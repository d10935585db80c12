//! UART support for STM32
//!
//! Converts the board-agnostic [`UartConfig`] into an embassy
//! `usart::Config` and maps driver errors to a local error type.

use embassy_stm32::usart::{self, Error as UsartError};
use macropad_hal::uart::{DataBits, Parity, StopBits, UartConfig};

/// Build an embassy USART configuration
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut cfg = usart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    cfg.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    cfg
}

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Transfer longer than the driver accepts
    BufferTooLong,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooLong,
            _ => UartBusError::Other,
        }
    }
}
