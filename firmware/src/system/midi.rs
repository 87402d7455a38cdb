//! Serial output of the timing clock.

use crate::system::hal::pac::UART4;
use crate::system::hal::prelude::*;
use crate::system::hal::serial::Tx;

use tapclock_control::ClockOutput;

pub struct Midi {
    tx: Tx<UART4>,
    dropped: u32,
}

impl Midi {
    #[must_use]
    pub fn new(tx: Tx<UART4>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Number of bytes dropped since boot due to busy transmitter.
    #[must_use]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl ClockOutput for Midi {
    fn write_byte(&mut self, byte: u8) {
        // A single byte takes 320 us on the wire, way less than the
        // shortest pulse period. If the transmitter is still busy, the byte
        // is dropped rather than stalling the interrupt.
        match self.tx.write(byte) {
            Ok(()) => (),
            Err(nb::Error::WouldBlock) => {
                self.dropped = self.dropped.wrapping_add(1);
            }
            Err(nb::Error::Other(_)) => {
                defmt::warn!("Failed writing to MIDI");
            }
        }
    }
}
