//! Tempo model owned by the control loop.

use crate::config::Config;
use crate::hal::{BpmStore, PausedTimer, PulseTimer};
use crate::log;
use crate::save;
use crate::taps::{TapBuffer, TapInstant};
use crate::tempo::{Bpm, ClockPeriod};

/// The central piece of the control loop.
///
/// It takes debounced taps, turns complete sequences into tempo and
/// reprograms the pulse timer accordingly. It is never touched from the
/// pulse interrupt, the timer period is the only thing they share.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Controller {
    config: Config,
    taps: TapBuffer,
    bpm: Bpm,
}

impl Controller {
    /// Restore the last tempo and start the pulse timer with it.
    ///
    /// The restored tempo is not written back to the store.
    pub fn boot<T: PulseTimer, S: BpmStore>(config: Config, store: &mut S, timer: &mut T) -> Self {
        let bpm = if config.persistence {
            save::load(store)
        } else {
            Bpm::default()
        };

        let controller = Self {
            config,
            taps: TapBuffer::default(),
            bpm,
        };
        controller.reprogram(timer);
        log::info!("Booted with tempo={:?}", bpm);

        controller
    }

    /// Process a debounced tap taken at `now`.
    ///
    /// Returns the new tempo if this tap completed a sequence.
    pub fn tap<T: PulseTimer, S: BpmStore>(
        &mut self,
        now: TapInstant,
        timer: &mut T,
        store: &mut S,
    ) -> Option<Bpm> {
        let interval = self.taps.record_tap(now)?;
        let mut bpm = Bpm::from_interval(interval)?;

        if !bpm.is_valid() {
            if self.config.clamp_tapped_tempo {
                log::warning!("Tapped tempo={:?} is out of range, clamping", bpm);
                bpm = bpm.clamped();
            } else {
                log::warning!("Tapped tempo={:?} is out of range", bpm);
            }
        }

        self.apply_tempo(bpm, timer, store);
        Some(bpm)
    }

    /// Run periodic housekeeping, abandoning stale tap sequences.
    ///
    /// Returns `true` if a sequence was abandoned.
    pub fn poll(&mut self, now: TapInstant) -> bool {
        self.taps.check_timeout(now)
    }

    /// Switch to the given tempo, reprogramming the timer and storing it.
    pub fn apply_tempo<T: PulseTimer, S: BpmStore>(&mut self, bpm: Bpm, timer: &mut T, store: &mut S) {
        self.bpm = bpm;
        self.reprogram(timer);
        log::info!("Applied tempo={:?} period={=u32}us", bpm, self.clock_period().ticks());

        if self.config.persistence {
            save::save(store, bpm);
        }
    }

    #[must_use]
    pub fn bpm(&self) -> Bpm {
        self.bpm
    }

    #[must_use]
    pub fn clock_period(&self) -> ClockPeriod {
        self.bpm.clock_period()
    }

    #[must_use]
    pub fn pending_taps(&self) -> usize {
        self.taps.len()
    }

    fn reprogram<T: PulseTimer>(&self, timer: &mut T) {
        let mut timer = PausedTimer::new(timer);
        timer.set_period(self.clock_period());
    }
}
