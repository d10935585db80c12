//! UART transmit task
//!
//! Writes each chunk started by the transport, then signals completion so
//! the transport can start the next one.

use defmt::*;
use embassy_stm32::usart::BufferedUartTx;
use embedded_io_async::Write;

use macropad_core::transport::SerialTransport;
use macropad_hal_stm32::UartBusError;

use crate::channels::TX_CHUNKS;
use crate::serial::ChannelTx;

#[embassy_executor::task]
pub async fn uart_tx_task(
    mut tx: BufferedUartTx<'static>,
    transport: &'static SerialTransport<'static>,
) {
    info!("UART TX task started");

    let mut sink = ChannelTx;

    loop {
        let chunk = TX_CHUNKS.receive().await;

        if let Err(e) = tx.write_all(&chunk).await {
            warn!("UART write error: {:?}", UartBusError::from(e));
        } else if let Err(e) = tx.flush().await {
            warn!("UART flush error: {:?}", UartBusError::from(e));
        }

        let started = transport.on_transmit_complete(&mut sink);
        trace!("TX complete ({} bytes), next chunk {}", chunk.len(), started);
    }
}
