//! Serial transport context
//!
//! Owns the inbound and outbound rings plus the transmit-in-progress flag.
//! The receive interrupt is the only writer of the inbound ring; the
//! foreground loop is the only writer of the outbound ring. The outbound
//! ring is drained by whichever context wins the transmit flag.

use core::cmp::min;

use macropad_hal::UartTx;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use super::ring::RingBuffer;

/// Largest number of bytes handed to the UART in one transfer
pub const TX_CHUNK: usize = 64;

/// Interrupt-driven byte transport
#[derive(Debug)]
pub struct SerialTransport<'a> {
    rx: RingBuffer<'a>,
    tx: RingBuffer<'a>,
    transmitting: AtomicBool,
    chunk: usize,
    dropped_rx: AtomicU32,
    dropped_tx: AtomicU32,
}

impl<'a> SerialTransport<'a> {
    pub fn new(rx: RingBuffer<'a>, tx: RingBuffer<'a>) -> Self {
        Self {
            rx,
            tx,
            transmitting: AtomicBool::new(false),
            chunk: TX_CHUNK,
            dropped_rx: AtomicU32::new(0),
            dropped_tx: AtomicU32::new(0),
        }
    }

    /// Limit the size of each transfer (clamped to `1..=TX_CHUNK`)
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk.clamp(1, TX_CHUNK);
        self
    }

    // ISR side

    /// Accept one received byte
    ///
    /// Returns `false` if the inbound ring was full and the byte was dropped.
    pub fn on_byte_received(&self, byte: u8) -> bool {
        let stored = self.rx.write_byte(byte);
        if !stored {
            self.dropped_rx.fetch_add(1, Ordering::Relaxed);
        }
        stored
    }

    /// The previous transfer finished; release the flag and start the next one
    pub fn on_transmit_complete<T: UartTx>(&self, sink: &mut T) -> usize {
        self.transmitting.store(false, Ordering::Release);
        self.start_transmit(sink)
    }

    // Foreground side

    /// Take the oldest received byte
    pub fn read_byte(&self) -> Option<u8> {
        self.rx.read_byte()
    }

    /// Number of received bytes waiting to be read
    pub fn rx_available(&self) -> usize {
        self.rx.stored_count()
    }

    /// Queue `bytes` for transmission and kick the transmitter
    ///
    /// Bytes that do not fit are dropped. Returns how many were queued.
    pub fn send<T: UartTx>(&self, bytes: &[u8], sink: &mut T) -> usize {
        let queued = self.queue(bytes);
        self.start_transmit(sink);
        queued
    }

    /// Queue `bytes` without starting a transfer
    pub fn queue(&self, bytes: &[u8]) -> usize {
        let mut queued = 0;
        for &b in bytes {
            if self.tx.write_byte(b) {
                queued += 1;
            } else {
                self.dropped_tx.fetch_add(1, Ordering::Relaxed);
            }
        }
        queued
    }

    /// Start a transfer if none is in flight
    ///
    /// Returns the number of bytes handed to `sink`. Zero means another
    /// transfer is in flight, there was nothing to send, or the submit failed.
    pub fn start_transmit<T: UartTx>(&self, sink: &mut T) -> usize {
        if self
            .transmitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return 0;
        }

        let mut chunk = [0u8; TX_CHUNK];
        let want = min(self.tx.stored_count(), self.chunk);
        let mut len = 0;
        while len < want {
            match self.tx.read_byte() {
                Some(b) => {
                    chunk[len] = b;
                    len += 1;
                }
                None => break,
            }
        }

        if len == 0 {
            self.transmitting.store(false, Ordering::Release);
            return 0;
        }

        match sink.start_write(&chunk[..len]) {
            Ok(()) => len,
            Err(_) => {
                self.dropped_tx.fetch_add(len as u32, Ordering::Relaxed);
                self.transmitting.store(false, Ordering::Release);
                0
            }
        }
    }

    // Diagnostics

    pub fn is_transmitting(&self) -> bool {
        self.transmitting.load(Ordering::Acquire)
    }

    /// Bytes waiting in the outbound ring
    pub fn tx_pending(&self) -> usize {
        self.tx.stored_count()
    }

    /// Received bytes dropped because the inbound ring was full
    pub fn dropped_rx(&self) -> u32 {
        self.dropped_rx.load(Ordering::Relaxed)
    }

    /// Outbound bytes dropped on overflow or failed submit
    pub fn dropped_tx(&self) -> u32 {
        self.dropped_tx.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ring::ring_storage;
    use heapless::Vec;

    /// Records every submitted transfer
    #[derive(Default)]
    struct MockUart {
        writes: Vec<Vec<u8, TX_CHUNK>, 16>,
        fail: bool,
    }

    impl MockUart {
        fn sent(&self) -> Vec<u8, 256> {
            let mut all = Vec::new();
            for w in &self.writes {
                all.extend_from_slice(w).unwrap();
            }
            all
        }
    }

    impl UartTx for MockUart {
        type Error = ();

        fn start_write(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push(Vec::from_slice(data).unwrap()).unwrap();
            Ok(())
        }
    }

    #[test]
    fn test_received_bytes_read_in_order() {
        let rx = ring_storage::<8>();
        let tx = ring_storage::<8>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );

        for b in b"abc" {
            assert!(transport.on_byte_received(*b));
        }
        assert_eq!(transport.rx_available(), 3);
        assert_eq!(transport.read_byte(), Some(b'a'));
        assert_eq!(transport.read_byte(), Some(b'b'));
        assert_eq!(transport.read_byte(), Some(b'c'));
        assert_eq!(transport.read_byte(), None);
    }

    #[test]
    fn test_rx_overflow_counts_drops() {
        let rx = ring_storage::<4>();
        let tx = ring_storage::<4>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );

        for b in 0..5u8 {
            transport.on_byte_received(b);
        }
        assert_eq!(transport.rx_available(), 3);
        assert_eq!(transport.dropped_rx(), 2);
    }

    #[test]
    fn test_send_starts_transfer_and_sets_flag() {
        let rx = ring_storage::<8>();
        let tx = ring_storage::<32>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );
        let mut uart = MockUart::default();

        assert_eq!(transport.send(b"hello", &mut uart), 5);
        assert!(transport.is_transmitting());
        assert_eq!(uart.writes.len(), 1);
        assert_eq!(&uart.writes[0][..], b"hello");
    }

    #[test]
    fn test_second_start_while_transmitting_sends_nothing() {
        let rx = ring_storage::<8>();
        let tx = ring_storage::<32>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );
        let mut uart = MockUart::default();

        transport.send(b"one", &mut uart);
        transport.send(b"two", &mut uart);

        // Second chunk waits in the ring
        assert_eq!(uart.writes.len(), 1);
        assert_eq!(transport.tx_pending(), 3);
        assert_eq!(transport.start_transmit(&mut uart), 0);
    }

    #[test]
    fn test_completion_pumps_next_chunk() {
        let rx = ring_storage::<8>();
        let tx = ring_storage::<32>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );
        let mut uart = MockUart::default();

        transport.send(b"one", &mut uart);
        transport.send(b"two", &mut uart);

        assert_eq!(transport.on_transmit_complete(&mut uart), 3);
        assert!(transport.is_transmitting());

        // Nothing left: completion clears the flag
        assert_eq!(transport.on_transmit_complete(&mut uart), 0);
        assert!(!transport.is_transmitting());
        assert_eq!(&uart.sent()[..], b"onetwo");
    }

    #[test]
    fn test_chunk_limits_transfer_size() {
        let rx = ring_storage::<8>();
        let tx = ring_storage::<32>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        )
        .with_chunk(4);
        let mut uart = MockUart::default();

        transport.send(b"abcdefghij", &mut uart);
        while transport.on_transmit_complete(&mut uart) > 0 {}

        assert_eq!(uart.writes.len(), 3);
        assert_eq!(&uart.writes[0][..], b"abcd");
        assert_eq!(&uart.writes[2][..], b"ij");
        assert_eq!(&uart.sent()[..], b"abcdefghij");
    }

    #[test]
    fn test_submit_failure_leaves_flag_clear() {
        let rx = ring_storage::<8>();
        let tx = ring_storage::<32>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );
        let mut uart = MockUart {
            fail: true,
            ..Default::default()
        };

        assert_eq!(transport.send(b"lost", &mut uart), 4);
        assert!(!transport.is_transmitting());
        assert_eq!(transport.dropped_tx(), 4);

        // Recovers on the next send
        uart.fail = false;
        transport.send(b"ok", &mut uart);
        assert!(transport.is_transmitting());
        assert_eq!(&uart.sent()[..], b"ok");
    }

    #[test]
    fn test_tx_overflow_drops_excess() {
        let rx = ring_storage::<4>();
        let tx = ring_storage::<4>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );

        assert_eq!(transport.queue(b"abcde"), 3);
        assert_eq!(transport.dropped_tx(), 2);
    }

    #[test]
    fn test_empty_start_clears_flag() {
        let rx = ring_storage::<4>();
        let tx = ring_storage::<4>();
        let transport = SerialTransport::new(
            RingBuffer::init(&rx).unwrap(),
            RingBuffer::init(&tx).unwrap(),
        );
        let mut uart = MockUart::default();

        assert_eq!(transport.start_transmit(&mut uart), 0);
        assert!(!transport.is_transmitting());
        assert!(uart.writes.is_empty());
    }
}
