#![no_main]
#![no_std]

use tapclock_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = stm32h7xx_hal::pac, peripherals = true, dispatchers = [EXTI0])]
mod app {
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use tapclock_control::{Config, Controller, PulseClock, TapInstant};
    use tapclock_firmware::system::clock::{self, PulseClockTimer};
    use tapclock_firmware::system::inputs::Button;
    use tapclock_firmware::system::leds::BeatLedUser;
    use tapclock_firmware::system::midi::Midi;
    use tapclock_firmware::system::storage::Storage;
    use tapclock_firmware::system::System;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        controller: Controller,
        pulse_clock: PulseClock,
        pulse_timer: PulseClockTimer,
        button: Button,
        storage: Storage,
        midi: Midi,
        beat_led: BeatLedUser,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let button = system.button;
        let midi = system.midi;
        let beat_led = system.beat_led;
        let mut pulse_timer = system.pulse_timer;
        let mut storage = system.storage;

        // Holding the button during power-up keeps the serial line silent.
        let config = Config {
            diagnostic: button.active_no_filter(),
            ..Config::default()
        }
        .validated()
        .unwrap_or_default();
        if config.diagnostic {
            defmt::info!("Diagnostic mode, clock output is disabled");
        }

        let pulse_clock = PulseClock::new(&config);
        let controller = Controller::boot(config, &mut storage, &mut pulse_timer);

        control::spawn().unwrap();

        (
            Shared {},
            Local {
                controller,
                pulse_clock,
                pulse_timer,
                button,
                storage,
                midi,
                beat_led,
            },
            init::Monotonics(mono),
        )
    }

    #[task(binds = TIM2, local = [pulse_clock, midi, beat_led], priority = 4)]
    fn pulse(cx: pulse::Context) {
        clock::clear_pulse_interrupt();
        cx.local.pulse_clock.on_pulse(cx.local.midi, cx.local.beat_led);
    }

    #[task(local = [controller, pulse_timer, button, storage], priority = 2)]
    fn control(cx: control::Context) {
        control::spawn_after(1.millis()).unwrap();

        let controller = cx.local.controller;
        // Truncation keeps the instant wrapping, which taps are robust to.
        #[allow(clippy::cast_possible_truncation)]
        let now = TapInstant::from_ticks(monotonics::now().ticks() as u32);

        if cx.local.button.sample(now) {
            if let Some(bpm) = controller.tap(now, cx.local.pulse_timer, cx.local.storage) {
                defmt::info!("Tapped tempo={:?}", bpm);
            }
        } else if controller.poll(now) {
            defmt::debug!("Tap sequence abandoned");
        }
    }
}
