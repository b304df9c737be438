//! Timed animation steps

use crate::opcode::Opcode;

/// Number of single-color LEDs in the linear bank
pub const BANK_LEDS: usize = 7;

/// Number of channels of the multi-channel color LED
pub const COLOR_CHANNELS: usize = 4;

/// One timed step of an animation timeline
///
/// N is the number of channels the timeline drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<const N: usize> {
    /// How long the step lasts before the next one is considered
    pub duration_ms: u16,
    /// Per-channel operands: absolute levels for `LOAD`, signed deltas or divisors otherwise
    pub operands: [i8; N],
    /// Opcode bits
    pub opcode: Opcode,
    /// Opcode-specific scalar, the repeat count for `REPEAT`
    pub operand: u8,
}

/// Instruction for the linear LED bank
pub type BankInstruction = Instruction<BANK_LEDS>;

/// Instruction for the color LED
pub type ColorInstruction = Instruction<COLOR_CHANNELS>;

impl<const N: usize> Instruction<N> {
    /// Create an instruction from its raw parts
    pub const fn new(duration_ms: u16, operands: [i8; N], opcode: Opcode, operand: u8) -> Self {
        Self {
            duration_ms,
            operands,
            opcode,
            operand,
        }
    }

    /// Set every channel to the given levels
    pub const fn load(duration_ms: u16, levels: [i8; N]) -> Self {
        Self::new(duration_ms, levels, Opcode::LOAD, 0)
    }

    /// Add signed deltas to every channel
    pub const fn add(duration_ms: u16, deltas: [i8; N]) -> Self {
        Self::new(duration_ms, deltas, Opcode::ADD, 0)
    }

    /// Divide every channel by its divisor
    pub const fn div(duration_ms: u16, divisors: [i8; N]) -> Self {
        Self::new(duration_ms, divisors, Opcode::DIV, 0)
    }

    /// Add extra opcode bits
    #[must_use]
    pub const fn with(mut self, opcode: Opcode) -> Self {
        self.opcode = self.opcode.with(opcode);
        self
    }

    /// Repeat the instruction `times` more times before advancing
    #[must_use]
    pub const fn repeat(mut self, times: u8) -> Self {
        self.opcode = self.opcode.with(Opcode::REPEAT);
        self.operand = times;
        self
    }
}
