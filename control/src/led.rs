//! Beat indicator, lighting the led at the start of every beat.

use crate::tempo::PULSES_PER_BEAT;

/// Number of pulses the beat led stays lit.
pub const BLINK_DURATION: u8 = 4;

/// Which electrical level lights the led up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPolarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl LedPolarity {
    /// Translate desired led state into the level of its pin.
    #[must_use]
    pub fn level(self, lit: bool) -> bool {
        match self {
            Self::ActiveHigh => lit,
            Self::ActiveLow => !lit,
        }
    }
}

/// Change of the led requested by a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeatPhase {
    On,
    Off,
}

/// Derive the led phase from the position within a beat.
///
/// The led is turned on with the first pulse of a beat and off once
/// `blink_duration` pulses passed. Everything in between keeps the led
/// untouched. With a zero duration, the led is never lit.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeatIndicator {
    blink_duration: u8,
}

impl Default for BeatIndicator {
    fn default() -> Self {
        Self::new(BLINK_DURATION)
    }
}

impl BeatIndicator {
    #[must_use]
    pub fn new(blink_duration: u8) -> Self {
        Self {
            blink_duration: blink_duration.min(PULSES_PER_BEAT - 1),
        }
    }

    #[must_use]
    pub fn phase(&self, pulse: u8) -> Option<BeatPhase> {
        if pulse == self.blink_duration {
            Some(BeatPhase::Off)
        } else if pulse == 0 {
            Some(BeatPhase::On)
        } else {
            None
        }
    }
}
