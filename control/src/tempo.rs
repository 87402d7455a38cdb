//! Tempo model, converting between BPM and the pulse clock period.
//!
//! BPM is kept in tenths to allow sub-integer precision without floats.
//! All the conversions go through `u64` intermediates, so the
//! `60_000_000 * 10` numerator never overflows.

use fugit::{MicrosDurationU32, MillisDurationU32};

/// Pulses emitted per quarter note, following the MIDI timing clock.
pub const PULSES_PER_BEAT: u8 = 24;

/// Slowest supported tempo, 40.0 BPM.
pub const MINIMUM_BPM: u16 = 400;

/// Fastest supported tempo, 300.0 BPM.
pub const MAXIMUM_BPM: u16 = 3000;

/// Tempo used when nothing valid was persisted, 120.0 BPM.
pub const DEFAULT_BPM: u16 = 1200;

/// Tenths of a beat per minute in one millisecond interval.
const TENTHS_MINUTE_IN_MILLIS: u64 = 60_000 * 10;

/// Tenths of a beat per minute in one microsecond interval.
const TENTHS_MINUTE_IN_MICROS: u64 = 60_000_000 * 10;

/// Longest pause between two taps of a single sequence.
///
/// This equals one beat at the slowest supported tempo, so no valid cadence
/// gets abandoned mid-sequence.
pub const MAXIMUM_TAP_INTERVAL: MillisDurationU32 =
    MillisDurationU32::from_ticks((TENTHS_MINUTE_IN_MILLIS / MINIMUM_BPM as u64) as u32);

/// Time between two clock pulses.
pub type ClockPeriod = MicrosDurationU32;

/// Tempo in tenths of a beat per minute, e.g. 1200 is 120.0 BPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bpm(u16);

impl Default for Bpm {
    fn default() -> Self {
        Self(DEFAULT_BPM)
    }
}

impl Bpm {
    #[must_use]
    pub const fn new(tenths: u16) -> Self {
        Self(tenths)
    }

    #[must_use]
    pub const fn tenths(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= MINIMUM_BPM && self.0 <= MAXIMUM_BPM
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        Self(self.0.clamp(MINIMUM_BPM, MAXIMUM_BPM))
    }

    /// Derive tempo from an average interval between beats.
    ///
    /// Returns `None` for a zero interval. Results that do not fit into
    /// `u16` saturate, it is up to the caller to validate the range.
    #[must_use]
    pub fn from_interval(interval: MillisDurationU32) -> Option<Self> {
        let millis = u64::from(interval.ticks());
        if millis == 0 {
            return None;
        }
        let tenths = TENTHS_MINUTE_IN_MILLIS / millis;
        Some(Self(u16::try_from(tenths).unwrap_or(u16::MAX)))
    }

    /// Period of the pulse clock running at this tempo.
    ///
    /// The tempo must not be zero. Everything that passes through
    /// `Controller` is in the valid range.
    #[must_use]
    pub fn clock_period(self) -> ClockPeriod {
        let tenths = u64::from(self.0.max(1));
        let micros = TENTHS_MINUTE_IN_MICROS / tenths / u64::from(PULSES_PER_BEAT);
        ClockPeriod::from_ticks(micros as u32)
    }

    /// Tempo that a pulse clock with the given period runs at.
    #[must_use]
    pub fn from_clock_period(period: ClockPeriod) -> Option<Self> {
        let micros = u64::from(period.ticks());
        if micros == 0 {
            return None;
        }
        let tenths = TENTHS_MINUTE_IN_MICROS / micros / u64::from(PULSES_PER_BEAT);
        Some(Self(u16::try_from(tenths).unwrap_or(u16::MAX)))
    }
}
