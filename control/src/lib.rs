//! Tempo tracking and clock generation, turning taps into MIDI clock.
//!
//! It is targetted to run in a firmware with two execution contexts: a
//! cooperative control loop and a periodic timer interrupt. Everything
//! touching hardware goes through the traits in [`hal`], so the whole
//! engine can be exercised on the host as well.
//!
//! ```text
//!     [ Button ] --(tap)--> [ Controller {TapBuffer, Bpm} ] <----> {BpmStore}
//!                                     |
//!                                     | (ClockPeriod)
//!                                     V
//!                               [ PulseTimer ]
//!                                     |
//!                                     | (interrupt)
//!                                     V
//!                         [ PulseClock {PulseCounter} ]
//!                              |               |
//!                       [ClockOutput]      [BeatLed]
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod controller;
pub mod hal;
pub mod led;
mod log;
pub mod pulse;
pub mod save;
pub mod taps;
pub mod tempo;

pub use crate::config::{Config, ConfigError};
pub use crate::controller::Controller;
pub use crate::hal::{BeatLed, BpmStore, ClockOutput, PausedTimer, PulseTimer};
pub use crate::led::LedPolarity;
pub use crate::pulse::PulseClock;
pub use crate::taps::{TapBuffer, TapInstant};
pub use crate::tempo::{Bpm, ClockPeriod};
