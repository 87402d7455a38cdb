//! Hardware timer driving the pulse interrupt.

use core::time::Duration;

use tapclock_control::{ClockPeriod, PulseTimer};

use crate::system::hal::pac::TIM2;
use crate::system::hal::timer::{Event, Timer};

pub struct PulseClockTimer {
    timer: Timer<TIM2>,
}

impl PulseClockTimer {
    #[must_use]
    pub fn new(timer: Timer<TIM2>) -> Self {
        Self { timer }
    }
}

impl PulseTimer for PulseClockTimer {
    fn pause(&mut self) {
        self.timer.unlisten(Event::TimeOut);
    }

    fn resume(&mut self) {
        self.timer.listen(Event::TimeOut);
    }

    fn set_period(&mut self, period: ClockPeriod) {
        self.timer
            .set_timeout(Duration::from_micros(u64::from(period.ticks())));

        // Prescaler is buffered. Without an update event the first interval
        // would still count with the previous one.
        // SAFETY: The control loop owns the timer and the interrupt is not
        // listened to while the period changes.
        let tim2 = unsafe { &*TIM2::ptr() };
        tim2.cr1.modify(|_, w| w.urs().counter_only());
        tim2.egr.write(|w| w.ug().set_bit());

        self.timer.reset_counter();
        self.timer.clear_irq();
    }
}

/// Acknowledge the pulse interrupt.
///
/// The timer itself is owned by the control loop, the interrupt only
/// touches the status register.
pub fn clear_pulse_interrupt() {
    // SAFETY: Clearing the update flag is a single write to a register
    // that the control loop never writes to while the interrupt is enabled.
    let tim2 = unsafe { &*TIM2::ptr() };
    tim2.sr.modify(|_, w| w.uif().clear_bit());
}

/// Whether the timer elapsed since the interrupt was last acknowledged.
#[must_use]
pub fn pulse_pending() -> bool {
    // SAFETY: Read only.
    let tim2 = unsafe { &*TIM2::ptr() };
    tim2.sr.read().uif().bit_is_set()
}
