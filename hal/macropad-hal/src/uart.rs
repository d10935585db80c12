//! UART serial communication abstractions
//!
//! Reception is interrupt-driven: the chip HAL hands each received byte to
//! the transport as it arrives, so there is no receive trait here. Transmit
//! is split into a non-blocking submit and a later completion notification.

/// UART transmitter
///
/// Starts an interrupt- or DMA-driven transfer and returns immediately.
/// Completion is reported back to the transport by the caller's
/// transmit-complete handler.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Begin transmitting `data`
    ///
    /// The implementation must take its own copy of `data` before returning.
    /// Returns an error if the peripheral is busy or the transfer could not
    /// be queued, in which case nothing was sent.
    fn start_write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    type Error = T::Error;

    fn start_write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).start_write(data)
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
