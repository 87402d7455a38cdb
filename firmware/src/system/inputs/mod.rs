//! Abstraction of the tap button.
//!
//! The button is polled from the control loop. Bouncing contacts are
//! filtered here, the control engine receives only clean taps.

mod button;
mod debounced;

pub use button::{Button, Pin as ButtonPin, DEBOUNCE_DELAY};
pub use debounced::Debounced;
