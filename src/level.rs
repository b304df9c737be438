//! Brightness level arithmetic
//!
//! All LEDs run at 4-bit resolution, so every stored level is in `[0, MAX_LEVEL]`.
//! Deltas coming from animation operands are signed and are widened to `i16`
//! before any arithmetic, which keeps every `i8` operand exact.

/// Highest brightness level a channel can hold
pub const MAX_LEVEL: u8 = 15;

/// Number of distinct brightness levels (`0..LEVELS`)
pub const LEVELS: u8 = MAX_LEVEL + 1;

const MAX_LEVEL_WIDE: i16 = MAX_LEVEL as i16;

/// Add a signed delta to a level
///
/// Results outside `[0, MAX_LEVEL]` reset the channel to black instead of
/// clamping it.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn wrapping_add(level: u8, delta: i8) -> u8 {
    let sum = level as i16 + delta as i16;
    if sum < 0 || sum > MAX_LEVEL_WIDE {
        return 0;
    }
    sum as u8
}

/// Divide a level by a channel divisor
///
/// A zero (or negative) divisor leaves the level unchanged.
#[inline]
#[allow(clippy::cast_sign_loss)]
pub const fn divide(level: u8, divisor: i8) -> u8 {
    if divisor <= 0 {
        return level;
    }
    level / divisor as u8
}

/// Clamp a widened level into range and return the signed excess removed
///
/// A value below zero returns a negative excess, a value above `MAX_LEVEL`
/// returns a positive one.
#[inline]
pub const fn saturate(value: &mut i16) -> i16 {
    if *value < 0 {
        let excess = *value;
        *value = 0;
        excess
    } else if *value > MAX_LEVEL_WIDE {
        let excess = *value - MAX_LEVEL_WIDE;
        *value = MAX_LEVEL_WIDE;
        excess
    } else {
        0
    }
}

/// Convert a load operand into a level, clamping anything out of range
#[inline]
#[allow(clippy::cast_sign_loss)]
pub const fn from_operand(operand: i8) -> u8 {
    if operand < 0 {
        return 0;
    }
    let level = operand as u8;
    if level > MAX_LEVEL { MAX_LEVEL } else { level }
}

/// Check whether an operand is a valid absolute level
#[inline]
pub const fn is_level(operand: i8) -> bool {
    operand >= 0 && operand <= MAX_LEVEL as i8
}
