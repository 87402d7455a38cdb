//! Peripherals the engine talks to.
//!
//! The firmware implements these on top of the board, tests implement them
//! with plain recorders.

use crate::tempo::ClockPeriod;

/// Serial sink of the clock bytes.
pub trait ClockOutput {
    /// Must not block, the call happens from within an interrupt.
    fn write_byte(&mut self, byte: u8);
}

/// Led showing the beat.
pub trait BeatLed {
    /// Set the electrical level of the led pin.
    fn set_level(&mut self, high: bool);
}

/// Two bytes of persistent memory holding the last tempo.
pub trait BpmStore {
    fn load(&mut self) -> Option<[u8; 2]>;
    fn save(&mut self, bytes: [u8; 2]);
}

/// Hardware timer firing the pulse interrupt.
pub trait PulseTimer {
    /// Mask the pulse interrupt.
    fn pause(&mut self);
    /// Unmask the pulse interrupt.
    fn resume(&mut self);
    fn set_period(&mut self, period: ClockPeriod);
}

/// Pulse timer with its interrupt masked for as long as this lives.
///
/// The interrupt is unmasked once this is dropped, on any path out of the
/// scope, so the handler never observes a half-written period.
pub struct PausedTimer<'a, T: PulseTimer> {
    timer: &'a mut T,
}

impl<'a, T: PulseTimer> PausedTimer<'a, T> {
    pub fn new(timer: &'a mut T) -> Self {
        timer.pause();
        Self { timer }
    }

    pub fn set_period(&mut self, period: ClockPeriod) {
        self.timer.set_period(period);
    }
}

impl<T: PulseTimer> Drop for PausedTimer<'_, T> {
    fn drop(&mut self) {
        self.timer.resume();
    }
}
