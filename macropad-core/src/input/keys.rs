//! Per-line key tracking

use super::events::{KeyState, LineId};

/// One discrete input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyLine {
    id: LineId,
    state: KeyState,
    count: u32,
    /// Consecutive ticks the sampled level has differed from `state`
    pending: u8,
}

impl KeyLine {
    pub const fn new(id: LineId) -> Self {
        Self {
            id,
            state: KeyState::Released,
            count: 0,
            pending: 0,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    /// Number of accepted level changes
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Feed one sample
    ///
    /// With `debounce == 0` any differing sample is accepted at once. With
    /// `debounce == d` it must persist for `d` further ticks. Returns the new
    /// state when a change is accepted.
    pub fn sample(&mut self, sampled: KeyState, debounce: u8) -> Option<KeyState> {
        if sampled == self.state {
            self.pending = 0;
            return None;
        }

        if self.pending < debounce {
            self.pending += 1;
            return None;
        }

        self.pending = 0;
        self.state = sampled;
        self.count = self.count.wrapping_add(1);
        Some(sampled)
    }
}
