use fugit::MillisDurationU32;
use tapclock_control::TapInstant;

use super::debounced::Debounced;
use crate::system::hal::gpio;

/// Shortest time between two taps.
pub const DEBOUNCE_DELAY: MillisDurationU32 = MillisDurationU32::from_ticks(30);

pub type Pin = gpio::gpiog::PG14<gpio::Input>;

/// Tap button, pulled up and shorting to the ground when pressed.
pub struct Button {
    pin: Pin,
    debounced: Debounced<4>,
    last_tap: Option<TapInstant>,
}

impl Button {
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            debounced: Debounced::new(),
            last_tap: None,
        }
    }

    /// Sample the button at `now`, returning `true` if it was just tapped.
    ///
    /// Presses that follow the previous tap sooner than `DEBOUNCE_DELAY`
    /// are ignored.
    pub fn sample(&mut self, now: TapInstant) -> bool {
        if !self.debounced.update(self.pin.is_low()) {
            return false;
        }

        let settled = self.last_tap.map_or(true, |last| {
            now.checked_duration_since(last)
                .map_or(true, |since| since >= DEBOUNCE_DELAY)
        });
        if settled {
            self.last_tap = Some(now);
        }

        settled
    }

    pub fn active_no_filter(&self) -> bool {
        self.pin.is_low()
    }
}
