use core::fmt;

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{Animation, Catalog, LedGroup};
use crate::clock::TimeSource;
use crate::diffusion::Arcs;
use crate::instruction::{BANK_LEDS, COLOR_CHANNELS};
use crate::interpreter::Topology;
use crate::playback::{Exhaustion, Playback};
use crate::selection::SelectionStore;
use crate::store::BrightnessStore;

/// Index of the first LED of the right arc on the reference board
pub const DEFAULT_SPLIT_POINT: usize = 6;

/// Configuration for the animation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Index of the first LED of the bank's right arc
    pub split_point: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            split_point: DEFAULT_SPLIT_POINT,
        }
    }
}

/// Error returned for an unusable engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Both arcs of the bank must hold at least one LED
    SplitOutOfRange(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitOutOfRange(split) => write!(
                f,
                "split point {} is outside 1..{} of the LED bank",
                split, BANK_LEDS
            ),
        }
    }
}

/// Animation engine - plays the selected animation on both LED groups
pub struct Engine<'a, S: SelectionStore> {
    // External dependencies and configuration
    catalog: Catalog<'a>,
    brightness: &'a BrightnessStore,
    selection: S,
    arcs: Arcs,

    // Internal state
    selected: u8,
    bank: Playback,
    color: Playback,
    bank_levels: [u8; BANK_LEDS],
    color_levels: [u8; COLOR_CHANNELS],
    last_call: u16,
}

impl<'a, S: SelectionStore> Engine<'a, S> {
    /// Create a new engine
    ///
    /// Call [`Engine::initialize`] before the first tick to set the time
    /// reference.
    pub fn new(
        catalog: Catalog<'a>,
        brightness: &'a BrightnessStore,
        mut selection: S,
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        let arcs = Arcs::new(config.split_point, BANK_LEDS)
            .ok_or(ConfigError::SplitOutOfRange(config.split_point))?;
        let selected = selection.load();
        Ok(Self {
            catalog,
            brightness,
            selection,
            arcs,
            selected,
            bank: Playback::new(),
            color: Playback::new(),
            bank_levels: [0; BANK_LEDS],
            color_levels: [0; COLOR_CHANNELS],
            last_call: 0,
        })
    }

    /// Reset playback and take `now` as the time reference
    ///
    /// Reloads the persisted selection and blanks every LED.
    pub fn initialize(&mut self, now: u16) {
        self.selected = self.selection.load();
        self.bank.reset();
        self.color.reset();
        self.bank_levels = [0; BANK_LEDS];
        self.color_levels = [0; COLOR_CHANNELS];
        self.brightness.publish_bank(self.bank_levels);
        self.brightness.publish_color(self.color_levels);
        self.last_call = now;
    }

    /// Advance both timelines to `now`
    ///
    /// `now` is a wrapping millisecond timestamp. Calling this again with the
    /// same timestamp does nothing.
    pub fn tick(&mut self, now: u16) {
        let delta = now.wrapping_sub(self.last_call);
        if delta == 0 {
            return;
        }
        self.bank.timer().advance(delta);
        self.color.timer().advance(delta);

        self.clamp_selection();
        let animation = self.current();

        let bank = self.bank.step(
            animation.bank(),
            &mut self.bank_levels,
            Topology::Ring(self.arcs),
            Exhaustion::Restart,
        );
        if bank.restarted {
            // The bank loop is the animation's loop point for both timers.
            self.color.timer().reset();
            #[cfg(feature = "esp32-log")]
            println!("[Engine.tick] restarting animation {:?}", animation.name());
        }
        if bank.applied {
            self.brightness.publish_bank(self.bank_levels);
        }

        let color = self.color.step(
            animation.color(),
            &mut self.color_levels,
            Topology::Channels,
            Exhaustion::Hold,
        );
        if color.applied {
            self.brightness.publish_color(self.color_levels);
        }

        self.last_call = now;
    }

    /// [`Engine::initialize`] with the current time of `clock`
    pub fn initialize_from<T: TimeSource + ?Sized>(&mut self, clock: &T) {
        self.initialize(clock.now_ms());
    }

    /// [`Engine::tick`] with the current time of `clock`
    pub fn tick_from<T: TimeSource + ?Sized>(&mut self, clock: &T) {
        self.tick(clock.now_ms());
    }

    /// Advance both timelines to an `embassy-time` instant
    ///
    /// Only the low 16 bits of the millisecond count are used.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick_at(&mut self, now: Instant) {
        self.tick(now.as_millis() as u16);
    }

    /// Switch to another animation
    ///
    /// Out of range indices are ignored. An accepted index is persisted and
    /// both timelines start over from their first instruction.
    pub fn select(&mut self, index: u8) {
        if index >= self.catalog.len() {
            #[cfg(feature = "esp32-log")]
            println!("[Engine.select] ignoring out of range index {:?}", index);
            return;
        }

        #[cfg(feature = "esp32-log")]
        println!("[Engine.select] switching to animation {:?}", index);
        self.selected = index;
        self.selection.save(index);
        self.bank.reset();
        self.color.reset();
    }

    /// Switch to the animation after the current one, wrapping around
    pub fn select_next(&mut self) {
        let next = self.selected_index().wrapping_add(1) % self.catalog.len();
        self.select(next);
    }

    /// Index of the animation being played
    pub fn selected_index(&self) -> u8 {
        if self.selected < self.catalog.len() {
            self.selected
        } else {
            0
        }
    }

    /// Animation being played
    pub fn current(&self) -> &'a Animation<'a> {
        self.catalog
            .get(self.selected)
            .unwrap_or_else(|| self.catalog.first())
    }

    pub const fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Playback state of one timeline
    pub const fn playback(&self, group: LedGroup) -> &Playback {
        match group {
            LedGroup::Bank => &self.bank,
            LedGroup::Color => &self.color,
        }
    }

    /// Store the LED drivers read from
    pub const fn brightness(&self) -> &'a BrightnessStore {
        self.brightness
    }

    /// Current bank levels
    pub const fn bank_levels(&self) -> &[u8; BANK_LEDS] {
        &self.bank_levels
    }

    /// Current color LED levels
    pub const fn color_levels(&self) -> &[u8; COLOR_CHANNELS] {
        &self.color_levels
    }

    pub const fn selection(&self) -> &S {
        &self.selection
    }

    /// Fall back to the first animation if the stored index is invalid
    fn clamp_selection(&mut self) {
        if self.selected < self.catalog.len() {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[Engine.clamp_selection] stored index {:?} is out of range, using 0",
            self.selected
        );
        self.selected = 0;
        self.selection.save(0);
    }
}
