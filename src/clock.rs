//! Millisecond timebase

use core::cell::Cell;

use critical_section::Mutex;

/// Source of a wrapping 16-bit millisecond timestamp
pub trait TimeSource {
    /// Current time in milliseconds
    fn now_ms(&self) -> u16;
}

impl<F: Fn() -> u16> TimeSource for F {
    fn now_ms(&self) -> u16 {
        self()
    }
}

/// Millisecond counter fed by a periodic timer interrupt
///
/// The interrupt calls [`MillisClock::advance`]; the main loop reads the
/// counter through [`TimeSource`]. A 16-bit read is not atomic on every
/// target, so both sides go through a critical section.
pub struct MillisClock {
    ticks: Mutex<Cell<u16>>,
}

impl MillisClock {
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Add elapsed milliseconds, wrapping at `u16::MAX`
    pub fn advance(&self, ms: u16) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(ms));
        });
    }
}

impl Default for MillisClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MillisClock {
    fn now_ms(&self) -> u16 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }
}
