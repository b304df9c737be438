#![no_std]

pub mod animation;
pub mod clock;
pub mod content;
pub mod control;
pub mod diffusion;
pub mod engine;
pub mod frame_scheduler;
pub mod instruction;
pub mod interpreter;
pub mod level;
pub mod opcode;
pub mod playback;
pub mod selection;
pub mod store;

pub use animation::{Animation, AnimationError, Catalog, CatalogError, LedGroup};
pub use clock::{MillisClock, TimeSource};
pub use control::{Control, ControlQueue, ControlReceiver, ControlSender, QueueFull};
pub use engine::{ConfigError, Engine, EngineConfig};
pub use frame_scheduler::FrameScheduler;
pub use instruction::{BANK_LEDS, BankInstruction, COLOR_CHANNELS, ColorInstruction, Instruction};
pub use level::{LEVELS, MAX_LEVEL};
pub use opcode::Opcode;
pub use playback::Playback;
pub use selection::{RamSelection, SelectionStore};
pub use store::BrightnessStore;

pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait for drivers that take levels pushed to them. Drivers
/// that refresh from an interrupt read the [`BrightnessStore`] instead.
pub trait OutputDriver {
    /// Write the bank and color LED levels, each in `0..=MAX_LEVEL`
    fn write(&mut self, bank: &[u8; BANK_LEDS], color: &[u8; COLOR_CHANNELS]);
}
