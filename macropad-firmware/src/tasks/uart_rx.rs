//! UART receive task
//!
//! Stands in for the receive interrupt: every byte the UART delivers is
//! pushed into the transport's inbound ring.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::Read;

use macropad_core::transport::SerialTransport;
use macropad_hal_stm32::UartBusError;

/// Bytes pulled from the driver per read
const READ_CHUNK: usize = 32;

#[embassy_executor::task]
pub async fn uart_rx_task(
    mut rx: BufferedUartRx<'static>,
    transport: &'static SerialTransport<'static>,
) {
    info!("UART RX task started");

    let mut buf = [0u8; READ_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    if !transport.on_byte_received(byte) {
                        warn!(
                            "RX ring full, byte dropped ({} total)",
                            transport.dropped_rx()
                        );
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", UartBusError::from(e));
            }
        }
    }
}
