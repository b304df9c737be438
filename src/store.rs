//! Brightness store shared with the LED drivers
//!
//! The engine is the only writer. Drivers, usually running from a timer
//! interrupt, read whole vectors through a critical section, so they always see
//! a complete set of in-range levels.

use core::cell::Cell;

use critical_section::Mutex;

use crate::instruction::{BANK_LEDS, COLOR_CHANNELS};

/// Current brightness of every LED channel
///
/// Usually placed in a `static` so the refresh interrupt can read it:
///
/// ```ignore
/// static BRIGHTNESS: BrightnessStore = BrightnessStore::new();
///
/// fn refresh_interrupt() {
///     let bank = BRIGHTNESS.bank();
///     // compare against the soft-PWM counter ...
/// }
/// ```
pub struct BrightnessStore {
    bank: Mutex<Cell<[u8; BANK_LEDS]>>,
    color: Mutex<Cell<[u8; COLOR_CHANNELS]>>,
}

impl BrightnessStore {
    /// Create a store with every channel dark
    pub const fn new() -> Self {
        Self {
            bank: Mutex::new(Cell::new([0; BANK_LEDS])),
            color: Mutex::new(Cell::new([0; COLOR_CHANNELS])),
        }
    }

    /// Snapshot of the linear bank levels
    pub fn bank(&self) -> [u8; BANK_LEDS] {
        critical_section::with(|cs| self.bank.borrow(cs).get())
    }

    /// Snapshot of the color LED levels
    pub fn color(&self) -> [u8; COLOR_CHANNELS] {
        critical_section::with(|cs| self.color.borrow(cs).get())
    }

    pub(crate) fn publish_bank(&self, levels: [u8; BANK_LEDS]) {
        critical_section::with(|cs| self.bank.borrow(cs).set(levels));
    }

    pub(crate) fn publish_color(&self, levels: [u8; COLOR_CHANNELS]) {
        critical_section::with(|cs| self.color.borrow(cs).set(levels));
    }
}

impl Default for BrightnessStore {
    fn default() -> Self {
        Self::new()
    }
}
