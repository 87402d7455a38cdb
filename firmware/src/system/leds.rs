use daisy::led::{Led, LedUser};

use tapclock_control::BeatLed;

/// The user led of the board, blinking with the beat.
pub struct BeatLedUser {
    led: LedUser,
}

impl BeatLedUser {
    #[must_use]
    pub fn new(led: LedUser) -> Self {
        Self { led }
    }
}

impl BeatLed for BeatLedUser {
    fn set_level(&mut self, high: bool) {
        if high {
            self.led.on();
        } else {
            self.led.off();
        }
    }
}
