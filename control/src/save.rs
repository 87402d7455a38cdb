//! Persisting tempo between power cycles.

use crate::hal::BpmStore;
use crate::log;
use crate::tempo::Bpm;

/// Tempo as stored in persistent memory, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Save {
    bpm: Bpm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidData;

impl Save {
    pub const SIZE: usize = 2;

    #[must_use]
    pub fn new(bpm: Bpm) -> Self {
        Self { bpm }
    }

    /// # Errors
    ///
    /// This fails with `InvalidData` when the stored tempo is outside of
    /// the supported range. This includes erased memory.
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Result<Self, InvalidData> {
        let bpm = Bpm::new(u16::from_be_bytes(bytes));
        if bpm.is_valid() {
            Ok(Self { bpm })
        } else {
            Err(InvalidData)
        }
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        self.bpm.tenths().to_be_bytes()
    }

    #[must_use]
    pub fn bpm(&self) -> Bpm {
        self.bpm
    }
}

/// Recover the last stored tempo, falling back to the default.
pub fn load<S: BpmStore>(store: &mut S) -> Bpm {
    let Some(bytes) = store.load() else {
        log::info!("No tempo was found in store");
        return Bpm::default();
    };

    if let Ok(save) = Save::from_bytes(bytes) {
        log::info!("Loaded tempo={:?}", save.bpm());
        save.bpm()
    } else {
        log::warning!("Stored tempo {:?} is invalid, using default", bytes);
        Bpm::default()
    }
}

pub fn save<S: BpmStore>(store: &mut S, bpm: Bpm) {
    log::debug!("Saving tempo={:?}", bpm);
    store.save(Save::new(bpm).to_bytes());
}
