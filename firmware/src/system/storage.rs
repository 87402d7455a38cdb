pub use daisy::flash::Flash;

use tapclock_control::save::Save;
use tapclock_control::BpmStore;

/// Tempo is kept at the very start of the flash.
///
/// Every save erases and rewrites this one sector. Writes happen only on a
/// completed tap sequence, so even a session of constant retapping stays far
/// below the endurance of the part. Rotating across sectors would need a
/// sequence marker next to the two tempo bytes.
const ADDRESS: u32 = 0;

pub struct Storage {
    flash: Flash,
}

impl Storage {
    #[must_use]
    pub fn new(flash: Flash) -> Self {
        Self { flash }
    }
}

impl BpmStore for Storage {
    fn load(&mut self) -> Option<[u8; 2]> {
        let mut buffer = [0; Save::SIZE];
        self.flash.read(ADDRESS, &mut buffer);
        defmt::debug!("Read {=[u8]:#x} from flash", &buffer[..]);
        Some(buffer)
    }

    fn save(&mut self, bytes: [u8; 2]) {
        defmt::info!("Saving {=[u8]:#x} to flash", &bytes[..]);
        self.flash.write(ADDRESS, &bytes);
    }
}
