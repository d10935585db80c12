//! Fixed-capacity SPSC byte ring
//!
//! One slot is always left free so that `write_index == read_index` only
//! ever means "empty". Usable capacity is therefore `capacity - 1`.
//!
//! # Concurrency
//!
//! ```text
//! producer context ── write_byte ──▶ [ring] ── read_byte ──▶ consumer context
//!  (owns write_index)                          (owns read_index)
//! ```
//!
//! Each index has exactly one writer. The producer stores the data cell and
//! then publishes `write_index` with `Release`; the consumer loads
//! `write_index` with `Acquire` before reading the cell, and the mirror
//! image holds for `read_index`. Storage is caller-supplied `AtomicU8`
//! cells, so both contexts can hold a shared reference without `unsafe`.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Errors from ring construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingError {
    /// No backing storage was supplied
    NotReady,
}

/// Single-producer/single-consumer circular byte buffer
#[derive(Debug)]
pub struct RingBuffer<'a> {
    items: &'a [AtomicU8],
    write_index: AtomicUsize,
    read_index: AtomicUsize,
}

impl<'a> RingBuffer<'a> {
    /// Create a ring over caller-supplied storage
    ///
    /// Fails with [`RingError::NotReady`] if `storage` is empty.
    pub fn init(storage: &'a [AtomicU8]) -> Result<Self, RingError> {
        if storage.is_empty() {
            return Err(RingError::NotReady);
        }

        Ok(Self {
            items: storage,
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
        })
    }

    /// Reset both indices and hand the storage back to the caller
    pub fn deinit(self) -> &'a [AtomicU8] {
        self.write_index.store(0, Ordering::Relaxed);
        self.read_index.store(0, Ordering::Relaxed);
        self.items
    }

    /// Size of the backing storage in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Number of bytes currently stored
    #[inline]
    pub fn stored_count(&self) -> usize {
        let write = self.write_index.load(Ordering::Acquire);
        let read = self.read_index.load(Ordering::Acquire);
        Self::stored_between(write, read, self.items.len())
    }

    /// Number of bytes that can still be written
    #[inline]
    pub fn free_count(&self) -> usize {
        self.capacity() - 1 - self.stored_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stored_count() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stored_count() == self.capacity() - 1
    }

    /// Store one byte (producer side)
    ///
    /// Returns `false` without touching any state if the ring is full.
    pub fn write_byte(&self, byte: u8) -> bool {
        let len = self.items.len();
        let write = self.write_index.load(Ordering::Relaxed);
        let read = self.read_index.load(Ordering::Acquire);

        if Self::stored_between(write, read, len) >= len - 1 {
            return false;
        }

        self.items[write].store(byte, Ordering::Relaxed);
        self.write_index.store((write + 1) % len, Ordering::Release);
        true
    }

    /// Take the oldest byte (consumer side)
    ///
    /// Returns `None` if the ring is empty.
    pub fn read_byte(&self) -> Option<u8> {
        let len = self.items.len();
        let read = self.read_index.load(Ordering::Relaxed);
        let write = self.write_index.load(Ordering::Acquire);

        if Self::stored_between(write, read, len) == 0 {
            return None;
        }

        let byte = self.items[read].load(Ordering::Relaxed);
        self.read_index.store((read + 1) % len, Ordering::Release);
        Some(byte)
    }

    #[inline]
    fn stored_between(write: usize, read: usize, len: usize) -> usize {
        if write >= read {
            write - read
        } else {
            len - read + write
        }
    }
}

/// Zeroed storage for a ring of `N` bytes
///
/// Usable in `static` initialisers.
pub const fn ring_storage<const N: usize>() -> [AtomicU8; N] {
    [const { AtomicU8::new(0) }; N]
}
