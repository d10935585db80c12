//! Rotary encoder direction classification
//!
//! The hardware counter runs free and wraps at 16 bits. A move larger than
//! the threshold is trusted in the direction the counter moved; a small move
//! is read as the opposite direction. Both branches use the same strict
//! `> threshold` test, so a delta equal to the threshold falls on the
//! "small" side.

use super::events::Rotation;

/// Default noise threshold
pub const DEFAULT_THRESHOLD: u16 = 20;

/// Last observed counter value and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderState {
    last: u16,
    direction: Rotation,
    threshold: u16,
}

impl EncoderState {
    pub const fn new(threshold: u16) -> Self {
        Self {
            last: 0,
            direction: Rotation::Clockwise,
            threshold,
        }
    }

    /// Last observed raw count
    pub fn count(&self) -> u16 {
        self.last
    }

    /// Last emitted direction
    pub fn direction(&self) -> Rotation {
        self.direction
    }

    /// Compare a fresh counter reading with the last one
    ///
    /// Returns the classified direction if the count moved.
    pub fn observe(&mut self, count: u16) -> Option<Rotation> {
        let direction = classify(self.last, count, self.threshold)?;
        self.last = count;
        self.direction = direction;
        Some(direction)
    }
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Classify a counter move from `last` to `new`
pub fn classify(last: u16, new: u16, threshold: u16) -> Option<Rotation> {
    if new > last {
        if new - last > threshold {
            Some(Rotation::Clockwise)
        } else {
            Some(Rotation::Anticlockwise)
        }
    } else if new < last {
        if last - new > threshold {
            Some(Rotation::Anticlockwise)
        } else {
            Some(Rotation::Clockwise)
        }
    } else {
        None
    }
}
