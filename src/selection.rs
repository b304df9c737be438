//! Persistence of the selected animation

/// Storage for the selected animation index
///
/// Implement this on top of EEPROM or flash so the selection survives power
/// cycles. The engine reads it once on initialization and writes it on every
/// accepted selection. Stored values are not trusted: out of range indices
/// fall back to the first animation.
pub trait SelectionStore {
    /// Read the persisted index
    fn load(&mut self) -> u8;

    /// Persist a new index
    fn save(&mut self, index: u8);
}

impl<T: SelectionStore + ?Sized> SelectionStore for &mut T {
    fn load(&mut self) -> u8 {
        (**self).load()
    }

    fn save(&mut self, index: u8) {
        (**self).save(index);
    }
}

/// Selection kept in RAM only, lost on reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RamSelection {
    index: u8,
    writes: u32,
}

impl RamSelection {
    pub const fn new(index: u8) -> Self {
        Self { index, writes: 0 }
    }

    /// Currently stored index
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// How many times the index was written
    pub const fn writes(&self) -> u32 {
        self.writes
    }
}

impl SelectionStore for RamSelection {
    fn load(&mut self) -> u8 {
        self.index
    }

    fn save(&mut self, index: u8) {
        self.index = index;
        self.writes = self.writes.wrapping_add(1);
    }
}
