pub mod clock;
pub mod inputs;
pub mod leds;
pub mod midi;
pub mod storage;

pub use daisy::hal;

use hal::pac::CorePeripherals;
use hal::pac::Peripherals as DevicePeripherals;
use hal::prelude::*;
use systick_monotonic::Systick;

use clock::PulseClockTimer;
use inputs::Button;
use leds::BeatLedUser;
use midi::Midi;
use storage::Storage;

/// Baud rate of MIDI.
const MIDI_BAUD_RATE: u32 = 31_250;

pub struct System {
    pub mono: Systick<1000>,
    pub button: Button,
    pub beat_led: BeatLedUser,
    pub midi: Midi,
    pub pulse_timer: PulseClockTimer,
    pub storage: Storage,
}

impl System {
    /// Initialize system abstraction
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise.
    #[must_use]
    pub fn init(mut cp: CorePeripherals, dp: DevicePeripherals) -> Self {
        enable_cache(&mut cp);

        let board = daisy::Board::take().unwrap();
        let ccdr = daisy::board_freeze_clocks!(board, dp);
        let pins = daisy::board_split_gpios!(board, ccdr, dp);
        let storage = Storage::new(daisy::board_split_flash!(ccdr, dp, pins));

        let mono = Systick::new(cp.SYST, 480_000_000);
        let beat_led = BeatLedUser::new(daisy::board_split_leds!(pins).USER);
        let button = Button::new(pins.GPIO.PIN_B10.into_floating_input());

        let midi = {
            let tx = pins.GPIO.PIN_A3.into_alternate();
            let rx = pins.GPIO.PIN_A2.into_alternate();
            let serial = dp
                .UART4
                .serial(
                    (tx, rx),
                    MIDI_BAUD_RATE.bps(),
                    ccdr.peripheral.UART4,
                    &ccdr.clocks,
                )
                .unwrap();
            let (tx, _rx) = serial.split();
            Midi::new(tx)
        };

        let pulse_timer = PulseClockTimer::new(dp.TIM2.timer(
            100.Hz(),
            ccdr.peripheral.TIM2,
            &ccdr.clocks,
        ));

        Self {
            mono,
            button,
            beat_led,
            midi,
            pulse_timer,
            storage,
        }
    }
}

/// AN5212: Improve application performance when fetching instruction and
/// data, from both internal and external memories.
fn enable_cache(cp: &mut CorePeripherals) {
    cp.SCB.enable_icache();
    // NOTE: This requires cache management around all use of DMA.
    cp.SCB.enable_dcache(&mut cp.CPUID);
}
