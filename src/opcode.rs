//! Instruction opcodes
//!
//! Opcodes are bit flags. Every bit except [`Opcode::LOAD`] can be combined,
//! and combined bits are always evaluated in [`Opcode::EFFECT_ORDER`], followed
//! by [`Opcode::REPEAT`] as a timeline modifier. The effects do not commute, so
//! that order is part of the instruction format.

use core::ops::BitOr;

const BITS_ADD: u8 = 0x01;
const BITS_RSHIFT: u8 = 0x02;
const BITS_LSHIFT: u8 = 0x04;
const BITS_DIV: u8 = 0x10;
const BITS_USOURCE: u8 = 0x20;
const BITS_DSOURCE: u8 = 0x40;
const BITS_REPEAT: u8 = 0x80;

const BITS_ALL: u8 =
    BITS_ADD | BITS_RSHIFT | BITS_LSHIFT | BITS_DIV | BITS_USOURCE | BITS_DSOURCE | BITS_REPEAT;

/// Set of opcode bits carried by an instruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Opcode(u8);

impl Opcode {
    /// Replace the whole brightness vector with the operands
    pub const LOAD: Self = Self(0x00);
    /// Add the signed operands; out of range channels go black
    pub const ADD: Self = Self(BITS_ADD);
    /// Rotate the bank by one position, last channel to first
    pub const RSHIFT: Self = Self(BITS_RSHIFT);
    /// Rotate the bank by one position, first channel to last
    pub const LSHIFT: Self = Self(BITS_LSHIFT);
    /// Divide each channel by its operand
    pub const DIV: Self = Self(BITS_DIV);
    /// Add with overflow carried toward the split point
    pub const USOURCE: Self = Self(BITS_USOURCE);
    /// Add with overflow carried away from the split point
    pub const DSOURCE: Self = Self(BITS_DSOURCE);
    /// Apply the instruction `operand + 1` times before moving on
    pub const REPEAT: Self = Self(BITS_REPEAT);

    /// Evaluation order of the brightness-changing bits
    pub const EFFECT_ORDER: [Self; 6] = [
        Self::ADD,
        Self::RSHIFT,
        Self::LSHIFT,
        Self::USOURCE,
        Self::DSOURCE,
        Self::DIV,
    ];

    /// Decode a raw opcode byte
    ///
    /// Returns `None` if an unassigned bit is set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !BITS_ALL != 0 {
            return None;
        }
        Some(Self(bits))
    }

    /// Raw opcode byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Combine two opcodes
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if all bits of `other` are set
    ///
    /// `LOAD` has no bits, use [`Opcode::is_load`] to test for it.
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// `LOAD` is exclusive: it applies only when no other bit is set
    pub const fn is_load(self) -> bool {
        self.0 == 0
    }

    /// Check if the instruction repeats
    pub const fn repeats(self) -> bool {
        self.contains(Self::REPEAT)
    }
}

impl BitOr for Opcode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}
