//! Behavior of the module, resolved once at startup.

use crate::led::{LedPolarity, BLINK_DURATION};
use crate::tempo::PULSES_PER_BEAT;

/// Runtime configuration.
///
/// The firmware builds this once during initialization. Both branches of
/// every option stay compiled in, so they can be tested side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Suppress all clock output for the whole run, keeping the serial
    /// line free for diagnostics.
    pub diagnostic: bool,
    /// Load the tempo on boot and store it on every change.
    pub persistence: bool,
    pub led_polarity: LedPolarity,
    /// Pulses the beat led stays lit, must be below `PULSES_PER_BEAT`.
    pub blink_duration: u8,
    /// Keep tapped tempo within the supported range, the same way a
    /// loaded one is.
    pub clamp_tapped_tempo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diagnostic: false,
            persistence: true,
            led_polarity: LedPolarity::ActiveHigh,
            blink_duration: BLINK_DURATION,
            clamp_tapped_tempo: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    BlinkTooLong(u8),
}

impl Config {
    /// # Errors
    ///
    /// This fails with `BlinkTooLong` when the blink would span the whole
    /// beat, leaving the led lit forever.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.blink_duration >= PULSES_PER_BEAT {
            return Err(ConfigError::BlinkTooLong(self.blink_duration));
        }
        Ok(self)
    }
}
