//! Animation definitions and the animation catalog
//!
//! Animations are plain data. They are validated once when they are built, so
//! the engine can interpret them without any runtime error path. All
//! constructors are `const fn`, which lets firmware check its built-in tables
//! at compile time.

use core::fmt;

use crate::instruction::{BankInstruction, ColorInstruction, Instruction};
use crate::level;

/// The two independently animated LED groups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedGroup {
    /// Linear bank of single-color LEDs
    Bank,
    /// Multi-channel color LED
    Color,
}

impl LedGroup {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Color => "color",
        }
    }
}

/// Error returned when an animation timeline is malformed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationError {
    /// The timeline has no instructions
    EmptyTimeline(LedGroup),
    /// The summed durations do not fit the 16-bit millisecond timer
    TimelineTooLong(LedGroup),
    /// A `LOAD` operand is not a valid brightness level
    LoadOutOfRange {
        group: LedGroup,
        instruction: usize,
        channel: usize,
    },
    /// A `DIV` operand is negative
    NegativeDivisor {
        group: LedGroup,
        instruction: usize,
        channel: usize,
    },
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTimeline(group) => write!(f, "{} timeline is empty", group.as_str()),
            Self::TimelineTooLong(group) => {
                write!(f, "{} timeline is longer than {} ms", group.as_str(), u16::MAX)
            }
            Self::LoadOutOfRange {
                group,
                instruction,
                channel,
            } => write!(
                f,
                "{} instruction {} loads an out of range level on channel {}",
                group.as_str(),
                instruction,
                channel
            ),
            Self::NegativeDivisor {
                group,
                instruction,
                channel,
            } => write!(
                f,
                "{} instruction {} divides channel {} by a negative number",
                group.as_str(),
                instruction,
                channel
            ),
        }
    }
}

/// A named pair of independent instruction timelines
#[derive(Debug, Clone, Copy)]
pub struct Animation<'a> {
    name: &'a str,
    bank: &'a [BankInstruction],
    color: &'a [ColorInstruction],
}

impl<'a> Animation<'a> {
    /// Build an animation, validating both timelines
    pub const fn new(
        name: &'a str,
        bank: &'a [BankInstruction],
        color: &'a [ColorInstruction],
    ) -> Result<Self, AnimationError> {
        if let Err(err) = validate_timeline(LedGroup::Bank, bank) {
            return Err(err);
        }
        if let Err(err) = validate_timeline(LedGroup::Color, color) {
            return Err(err);
        }
        Ok(Self { name, bank, color })
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Instructions driving the linear bank
    pub const fn bank(&self) -> &'a [BankInstruction] {
        self.bank
    }

    /// Instructions driving the color LED
    pub const fn color(&self) -> &'a [ColorInstruction] {
        self.color
    }

    /// Total duration of one pass over the given timeline
    // Validation guarantees the total fits.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn duration_ms(&self, group: LedGroup) -> u16 {
        let total = match group {
            LedGroup::Bank => total_duration(self.bank),
            LedGroup::Color => total_duration(self.color),
        };
        total as u16
    }
}

const fn total_duration<const N: usize>(instructions: &[Instruction<N>]) -> u32 {
    let mut total = 0u32;
    let mut i = 0;
    while i < instructions.len() {
        total += instructions[i].duration_ms as u32;
        i += 1;
    }
    total
}

const fn validate_timeline<const N: usize>(
    group: LedGroup,
    instructions: &[Instruction<N>],
) -> Result<(), AnimationError> {
    if instructions.is_empty() {
        return Err(AnimationError::EmptyTimeline(group));
    }
    if total_duration(instructions) > u16::MAX as u32 {
        return Err(AnimationError::TimelineTooLong(group));
    }

    let mut i = 0;
    while i < instructions.len() {
        let instruction = &instructions[i];
        let load = instruction.opcode.is_load();
        let div = instruction.opcode.contains(crate::opcode::Opcode::DIV);
        let mut channel = 0;
        while channel < N {
            let operand = instruction.operands[channel];
            if load && !level::is_level(operand) {
                return Err(AnimationError::LoadOutOfRange {
                    group,
                    instruction: i,
                    channel,
                });
            }
            if div && operand < 0 {
                return Err(AnimationError::NegativeDivisor {
                    group,
                    instruction: i,
                    channel,
                });
            }
            channel += 1;
        }
        i += 1;
    }
    Ok(())
}

/// Error returned when a catalog cannot be built
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no animations
    Empty,
    /// The catalog has more animations than a `u8` index can address
    TooLarge,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("animation catalog is empty"),
            Self::TooLarge => f.write_str("animation catalog has more than 255 entries"),
        }
    }
}

/// Ordered, read-only list of animations
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    animations: &'a [Animation<'a>],
}

impl<'a> Catalog<'a> {
    pub const fn new(animations: &'a [Animation<'a>]) -> Result<Self, CatalogError> {
        if animations.is_empty() {
            return Err(CatalogError::Empty);
        }
        if animations.len() > u8::MAX as usize {
            return Err(CatalogError::TooLarge);
        }
        Ok(Self { animations })
    }

    /// Number of animations
    #[allow(clippy::cast_possible_truncation)]
    pub const fn len(&self) -> u8 {
        self.animations.len() as u8
    }

    /// A catalog is never empty
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Get an animation by index
    pub fn get(&self, index: u8) -> Option<&'a Animation<'a>> {
        self.animations.get(usize::from(index))
    }

    /// First animation, used as the fallback for invalid indices
    pub const fn first(&self) -> &'a Animation<'a> {
        &self.animations[0]
    }

    /// Find an animation index by name
    pub fn position(&self, name: &str) -> Option<u8> {
        self.animations
            .iter()
            .position(|animation| animation.name == name)
            .and_then(|index| u8::try_from(index).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Animation<'a>> + use<'a> {
        self.animations.iter()
    }
}
