use tapclock_control::pulse::TIMING_CLOCK;
use tapclock_control::tempo::PULSES_PER_BEAT;
use tapclock_control::{
    BeatLed, Bpm, BpmStore, ClockOutput, ClockPeriod, Config, Controller, PulseClock, PulseTimer,
    TapInstant,
};

#[derive(Default)]
struct Timer {
    period: Option<ClockPeriod>,
    masked: bool,
    elapsed_micros: u32,
}

impl PulseTimer for Timer {
    fn pause(&mut self) {
        self.masked = true;
    }

    fn resume(&mut self) {
        self.masked = false;
    }

    fn set_period(&mut self, period: ClockPeriod) {
        self.period = Some(period);
        self.elapsed_micros = 0;
    }
}

impl Timer {
    /// Advance by a millisecond, returning the number of elapsed periods.
    fn tick(&mut self) -> u32 {
        let Some(period) = self.period else {
            return 0;
        };
        assert!(!self.masked);
        self.elapsed_micros += 1000;
        let fired = self.elapsed_micros / period.ticks();
        self.elapsed_micros %= period.ticks();
        fired
    }
}

#[derive(Default)]
struct Store {
    bytes: Option<[u8; 2]>,
}

impl BpmStore for Store {
    fn load(&mut self) -> Option<[u8; 2]> {
        self.bytes
    }

    fn save(&mut self, bytes: [u8; 2]) {
        self.bytes = Some(bytes);
    }
}

#[derive(Default)]
struct Midi {
    bytes: Vec<u8>,
}

impl ClockOutput for Midi {
    fn write_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

#[derive(Default)]
struct Led {
    high: bool,
    rising_edges: usize,
}

impl BeatLed for Led {
    fn set_level(&mut self, high: bool) {
        if high && !self.high {
            self.rising_edges += 1;
        }
        self.high = high;
    }
}

struct Module {
    controller: Controller,
    pulse_clock: PulseClock,
    timer: Timer,
    store: Store,
    midi: Midi,
    led: Led,
    now: u32,
}

impl Module {
    fn new(config: Config, mut store: Store) -> Self {
        let mut timer = Timer::default();
        let controller = Controller::boot(config, &mut store, &mut timer);
        Self {
            controller,
            pulse_clock: PulseClock::new(&config),
            timer,
            store,
            midi: Midi::default(),
            led: Led::default(),
            now: 0,
        }
    }

    fn run_until(&mut self, millis: u32) {
        while self.now < millis {
            self.now += 1;
            for _ in 0..self.timer.tick() {
                self.pulse_clock.on_pulse(&mut self.midi, &mut self.led);
            }
            self.controller.poll(TapInstant::from_ticks(self.now));
        }
    }

    fn tap_at(&mut self, millis: u32) -> Option<Bpm> {
        self.run_until(millis);
        self.controller.tap(
            TapInstant::from_ticks(self.now),
            &mut self.timer,
            &mut self.store,
        )
    }
}

#[test]
fn tapping_half_second_intervals_sets_120_bpm() {
    let mut module = Module::new(
        Config::default(),
        Store {
            bytes: Some(900_u16.to_be_bytes()),
        },
    );
    assert_eq!(module.controller.bpm(), Bpm::new(900));

    let mut bpm = None;
    for t in [1000, 1500, 2000, 2500] {
        bpm = module.tap_at(t);
    }

    assert_eq!(bpm, Some(Bpm::new(1200)));
    assert_eq!(module.controller.clock_period().ticks(), 20_833);
    assert_eq!(module.timer.period, Some(ClockPeriod::from_ticks(20_833)));
    assert_eq!(module.store.bytes, Some([0x04, 0xB0]));
}

#[test]
fn clock_runs_24_pulses_per_beat() {
    let mut module = Module::new(Config::default(), Store::default());
    for t in [0, 500, 1000, 1500] {
        module.tap_at(t);
    }
    let pulses_before = module.midi.bytes.len();
    let beats_before = module.led.rising_edges;
    module.run_until(1500 + 10_000);

    // 20 beats of 120 BPM, give or take a pulse for the truncated period.
    let pulses = module.midi.bytes.len() - pulses_before;
    let expected = 20 * PULSES_PER_BEAT as usize;
    assert!(pulses.abs_diff(expected) <= 1, "{pulses} pulses");
    assert!(module.midi.bytes.iter().all(|b| *b == TIMING_CLOCK));
    let beats = module.led.rising_edges - beats_before;
    assert!(beats.abs_diff(20) <= 1, "{beats} beats");
}

#[test]
fn in_diagnostic_mode_nothing_is_ever_written_to_midi() {
    let config = Config {
        diagnostic: true,
        ..Config::default()
    };
    let mut module = Module::new(config, Store::default());
    for t in [0, 300, 600, 900, 2000, 2250, 2500, 2750] {
        module.tap_at(t);
    }
    module.run_until(20_000);

    assert!(module.midi.bytes.is_empty());
    assert!(module.led.rising_edges > 0);
    assert_eq!(module.controller.bpm(), Bpm::new(2400));
}

#[test]
fn pausing_after_three_taps_abandons_the_sequence() {
    let mut module = Module::new(Config::default(), Store::default());
    module.tap_at(0);
    module.tap_at(500);
    module.tap_at(1000);
    module.run_until(2600);
    assert_eq!(module.controller.pending_taps(), 0);

    assert_eq!(module.tap_at(3000), None);
    assert_eq!(module.controller.bpm(), Bpm::default());
    assert_eq!(module.store.bytes, None);
}

#[test]
fn invalid_stored_tempo_is_replaced_by_default() {
    for stored in [0_u16, 5000] {
        let module = Module::new(
            Config::default(),
            Store {
                bytes: Some(stored.to_be_bytes()),
            },
        );
        assert_eq!(module.controller.bpm(), Bpm::new(1200));
    }
}
