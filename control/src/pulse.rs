//! Handler of the pulse interrupt, emitting clock and blinking the led.

use crate::config::Config;
use crate::hal::{BeatLed, ClockOutput};
use crate::led::{BeatIndicator, BeatPhase, LedPolarity};
use crate::tempo::PULSES_PER_BEAT;

/// MIDI timing clock message.
pub const TIMING_CLOCK: u8 = 0xF8;

/// Position of the current pulse within a beat.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseCounter(u8);

impl PulseCounter {
    /// Move to the next pulse and return its position.
    pub fn advance(&mut self) -> u8 {
        self.0 = (self.0 + 1) % PULSES_PER_BEAT;
        self.0
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// State owned by the pulse interrupt.
///
/// Call `on_pulse` every time the pulse timer fires. It does a constant
/// amount of work and never blocks.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseClock {
    counter: PulseCounter,
    indicator: BeatIndicator,
    polarity: LedPolarity,
    emit_clock: bool,
}

impl PulseClock {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            counter: PulseCounter::default(),
            indicator: BeatIndicator::new(config.blink_duration),
            polarity: config.led_polarity,
            emit_clock: !config.diagnostic,
        }
    }

    pub fn on_pulse<O: ClockOutput, L: BeatLed>(&mut self, output: &mut O, led: &mut L) {
        if self.emit_clock {
            output.write_byte(TIMING_CLOCK);
        }

        let pulse = self.counter.advance();
        match self.indicator.phase(pulse) {
            Some(BeatPhase::On) => led.set_level(self.polarity.level(true)),
            Some(BeatPhase::Off) => led.set_level(self.polarity.level(false)),
            None => (),
        }
    }

    #[must_use]
    pub fn counter(&self) -> PulseCounter {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct Output {
        bytes: Vec<u8, 64>,
    }

    impl ClockOutput for Output {
        fn write_byte(&mut self, byte: u8) {
            self.bytes.push(byte).unwrap();
        }
    }

    #[derive(Default)]
    struct Led {
        level: Option<bool>,
        changes: Vec<(u8, bool), 16>,
        pulse: u8,
    }

    impl BeatLed for Led {
        fn set_level(&mut self, high: bool) {
            self.level = Some(high);
            self.changes.push((self.pulse, high)).unwrap();
        }
    }

    fn pulse(clock: &mut PulseClock, output: &mut Output, led: &mut Led) {
        led.pulse = clock.counter().value();
        clock.on_pulse(output, led);
    }

    #[test]
    fn counter_visits_every_position_once_per_beat() {
        let mut counter = PulseCounter::default();
        let mut visits = [0_u8; PULSES_PER_BEAT as usize];
        for _ in 0..PULSES_PER_BEAT {
            visits[counter.advance() as usize] += 1;
        }
        assert!(visits.iter().all(|v| *v == 1));
    }

    #[test]
    fn every_pulse_emits_timing_clock() {
        let mut clock = PulseClock::new(&Config::default());
        let mut output = Output::default();
        let mut led = Led::default();
        for _ in 0..48 {
            pulse(&mut clock, &mut output, &mut led);
        }
        assert_eq!(output.bytes.len(), 48);
        assert!(output.bytes.iter().all(|b| *b == TIMING_CLOCK));
    }

    #[test]
    fn in_diagnostic_mode_no_clock_is_emitted() {
        let config = Config {
            diagnostic: true,
            ..Config::default()
        };
        let mut clock = PulseClock::new(&config);
        let mut output = Output::default();
        let mut led = Led::default();
        for _ in 0..48 {
            pulse(&mut clock, &mut output, &mut led);
        }
        assert!(output.bytes.is_empty());
        assert_eq!(led.changes.len(), 4);
    }

    #[test]
    fn led_blinks_once_per_beat() {
        let mut clock = PulseClock::new(&Config::default());
        let mut output = Output::default();
        let mut led = Led::default();
        for _ in 0..PULSES_PER_BEAT {
            pulse(&mut clock, &mut output, &mut led);
        }
        // Counter starts at 0, so the first beat boundary is the last pulse.
        assert_eq!(led.changes.len(), 2);
        assert_eq!(led.changes[0], (3, false));
        assert_eq!(led.changes[1], (23, true));
        assert_eq!(led.level, Some(true));
    }

    #[test]
    fn active_low_led_is_driven_inverted() {
        let config = Config {
            led_polarity: LedPolarity::ActiveLow,
            ..Config::default()
        };
        let mut clock = PulseClock::new(&config);
        let mut output = Output::default();
        let mut led = Led::default();
        for _ in 0..PULSES_PER_BEAT {
            pulse(&mut clock, &mut output, &mut led);
        }
        assert_eq!(led.level, Some(false));
    }
}
