use tapclock_control::TapInstant;

use crate::system::inputs::Button;

const MS: u32 = 480_000_000 / 1000;

pub fn sample_until_button_is_clicked(button: &mut Button) {
    let mut now = 0_u32;
    loop {
        if button.sample(TapInstant::from_ticks(now)) {
            break;
        }
        now = now.wrapping_add(1);
        cortex_m::asm::delay(MS);
    }
}

pub fn delay_ms(ms: u32) {
    cortex_m::asm::delay(ms * MS);
}
