//! UART adapter between the serial transport and the TX task
//!
//! The transport starts a transfer by calling [`UartTx::start_write`]; here
//! that copies the chunk into [`TX_CHUNKS`] and returns straight away. The
//! TX task performs the actual write and reports completion back to the
//! transport.

use macropad_hal::UartTx;

use crate::channels::{TxChunk, TX_CHUNKS};

/// Why a transfer could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum TxError {
    /// Previous transfer still queued
    Busy,
    /// Chunk larger than a TX transfer
    TooLong,
}

/// Hands transmit chunks to the UART TX task
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelTx;

impl UartTx for ChannelTx {
    type Error = TxError;

    fn start_write(&mut self, data: &[u8]) -> Result<(), TxError> {
        let chunk = TxChunk::from_slice(data).map_err(|_| TxError::TooLong)?;
        TX_CHUNKS.try_send(chunk).map_err(|_| TxError::Busy)
    }
}
