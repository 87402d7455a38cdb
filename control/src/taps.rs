//! Collect taps of the user and turn a full sequence into an interval.

use fugit::{MillisDurationU32, TimerInstantU32};
use heapless::Vec;

use crate::log;
use crate::tempo::MAXIMUM_TAP_INTERVAL;

/// Number of taps forming one sequence.
pub const NUM_TAPS: usize = 4;

/// Monotonic millisecond timestamp of a tap.
pub type TapInstant = TimerInstantU32<1000>;

/// Fixed-capacity buffer of recent taps.
///
/// Call `record_tap` whenever a debounced tap arrives and `check_timeout`
/// periodically from the same context. Once `NUM_TAPS` taps are collected,
/// the averaged interval between them is returned and the buffer starts
/// over. A sequence that pauses for longer than `MAXIMUM_TAP_INTERVAL`
/// is dropped.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapBuffer {
    taps: Vec<TapInstant, NUM_TAPS>,
}

impl TapBuffer {
    /// Record a tap taken at `now`.
    ///
    /// Returns the average interval between taps once this tap fills the
    /// buffer. The buffer is cleared in that case, even when the interval
    /// turns out unusable (zero, or taps not in order).
    pub fn record_tap(&mut self, now: TapInstant) -> Option<MillisDurationU32> {
        if self.taps.push(now).is_err() {
            // Full buffers are always cleared below, this is unreachable.
            self.taps.clear();
            return None;
        }

        if !self.taps.is_full() {
            log::debug!("Tap {=usize}/{=usize}", self.taps.len(), NUM_TAPS);
            return None;
        }

        let interval = self.average_interval();
        self.taps.clear();

        if interval.is_none() {
            log::warning!("Dropping tap sequence with degenerate intervals");
        }
        interval
    }

    /// Drop the sequence in progress if the user stopped tapping.
    ///
    /// Returns `true` if the sequence was abandoned.
    pub fn check_timeout(&mut self, now: TapInstant) -> bool {
        if self.taps.is_full() {
            return false;
        }

        let Some(last) = self.taps.last() else {
            return false;
        };

        match now.checked_duration_since(*last) {
            Some(pause) if pause > MAXIMUM_TAP_INTERVAL => {
                log::debug!("Tap sequence timed out after {=usize} taps", self.taps.len());
                self.taps.clear();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.taps.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// The mean of equally weighted gaps only depends on the first and the
    /// last sample.
    fn average_interval(&self) -> Option<MillisDurationU32> {
        let first = self.taps.first()?;
        let last = self.taps.last()?;
        let span = last.checked_duration_since(*first)?;
        let average = span.ticks() / (NUM_TAPS as u32 - 1);
        if average == 0 {
            return None;
        }
        Some(MillisDurationU32::from_ticks(average))
    }
}
