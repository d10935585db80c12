//! Scan-tick input engine

use heapless::Vec;
use macropad_hal::{InputPin, PulseCounter};

use super::encoder::EncoderState;
use super::events::{EventSink, InputEvent, KeyState, LineId, Rotation};
use super::keys::KeyLine;
use crate::config::{InputConfig, MAX_KEYS};

/// Samples key lines and the encoder counter once per tick
pub struct InputEngine<P, C, const N: usize> {
    pins: [P; N],
    lines: [KeyLine; N],
    counter: C,
    encoder: EncoderState,
    debounce_ticks: u8,
}

impl<P: InputPin, C: PulseCounter, const N: usize> InputEngine<P, C, N> {
    pub fn new(pins: [P; N], ids: [LineId; N], counter: C, config: &InputConfig) -> Self {
        Self {
            pins,
            lines: ids.map(KeyLine::new),
            counter,
            encoder: EncoderState::new(config.direction_threshold),
            debounce_ticks: config.debounce_ticks,
        }
    }

    /// Sample every line in order, then the encoder
    ///
    /// Emits `KeyReleased` for each line that went pressed to released, then
    /// at most one `Rotated`.
    pub fn scan_tick<S: EventSink>(&mut self, sink: &mut S) {
        for (index, (pin, line)) in self.pins.iter().zip(self.lines.iter_mut()).enumerate() {
            let sampled = KeyState::from_level(pin.is_high());
            if line.sample(sampled, self.debounce_ticks) == Some(KeyState::Released) {
                sink.on_event(InputEvent::KeyReleased(index as u8));
            }
        }

        let count = self.counter.count();
        if let Some(direction) = self.encoder.observe(count) {
            sink.on_event(InputEvent::Rotated(direction));
        }
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.lines
            .get(index)
            .is_some_and(|l| l.state() == KeyState::Pressed)
    }

    pub fn transition_count(&self, index: usize) -> Option<u32> {
        self.lines.get(index).map(|l| l.count())
    }

    pub fn line(&self, index: usize) -> Option<&KeyLine> {
        self.lines.get(index)
    }

    /// Last observed encoder count
    pub fn toggle_count(&self) -> u16 {
        self.encoder.count()
    }

    /// Last emitted encoder direction
    pub fn toggle_direction(&self) -> Rotation {
        self.encoder.direction()
    }

    /// Copy of everything the status screen shows
    pub fn snapshot(&self) -> InputSnapshot {
        let mut keys = Vec::new();
        for line in self.lines.iter().take(MAX_KEYS) {
            // Bounded by take()
            let _ = keys.push(*line);
        }

        InputSnapshot {
            keys,
            toggle_count: self.encoder.count(),
            toggle_direction: self.encoder.direction(),
        }
    }
}

/// Point-in-time view of the input state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub keys: Vec<KeyLine, MAX_KEYS>,
    pub toggle_count: u16,
    pub toggle_direction: Rotation,
}
