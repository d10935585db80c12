//! Hardware pulse counter abstraction
//!
//! A timer in encoder mode counts quadrature edges on its own. Software only
//! samples the count and differences it against the previous sample.

/// Free-running hardware pulse counter
///
/// The count is 16 bits wide and wraps in both directions.
pub trait PulseCounter {
    /// Read the current raw count
    fn count(&mut self) -> u16;
}
