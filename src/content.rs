//! Built-in animations of the reference board
//!
//! Every table is validated at compile time. [`BLACKNESS`] is played right
//! before the device powers down and must stay the last entry.

use crate::animation::{Animation, AnimationError, Catalog, CatalogError};
use crate::instruction::{BankInstruction as B, ColorInstruction as C};

const fn valid(animation: Result<Animation<'static>, AnimationError>) -> Animation<'static> {
    match animation {
        Ok(animation) => animation,
        Err(_) => panic!("invalid built-in animation"),
    }
}

const fn valid_catalog(catalog: Result<Catalog<'static>, CatalogError>) -> Catalog<'static> {
    match catalog {
        Ok(catalog) => catalog,
        Err(_) => panic!("invalid built-in catalog"),
    }
}

// Scanner sweeping across the bank, color LED counting up to white
const KITT_BANK: [B; 14] = [
    B::load(200, [0, 0, 0, 0, 0, 0, 0]),
    B::load(100, [5, 0, 0, 0, 0, 0, 0]),
    B::load(100, [10, 5, 0, 0, 0, 0, 0]),
    B::load(100, [15, 10, 5, 0, 0, 0, 0]),
    B::load(100, [10, 15, 10, 5, 0, 0, 0]),
    B::load(100, [5, 10, 15, 10, 5, 0, 0]),
    B::load(100, [0, 5, 10, 15, 10, 5, 0]),
    B::load(100, [0, 0, 5, 10, 15, 10, 5]),
    B::load(100, [0, 0, 5, 10, 10, 15, 10]),
    B::load(100, [0, 0, 0, 5, 10, 10, 15]),
    B::load(100, [0, 0, 0, 0, 5, 10, 10]),
    B::load(100, [0, 0, 0, 0, 0, 5, 10]),
    B::load(100, [0, 0, 0, 0, 0, 0, 5]),
    B::load(200, [0, 0, 0, 0, 0, 0, 0]),
];
const KITT_COLOR: [C; 6] = [
    C::load(100, [0, 0, 0, 0]),
    C::add(100, [5, 0, 0, 0]).repeat(2),
    C::add(50, [0, 5, 0, 0]).repeat(2),
    C::add(50, [0, 0, 5, 0]).repeat(2),
    C::add(50, [0, 0, 0, 5]).repeat(2),
    C::load(750, [15, 15, 15, 15]),
];

const BREATHE_BANK: [B; 3] = [
    B::load(115, [0, 0, 0, 0, 0, 0, 0]),
    B::add(115, [3, 3, 3, 3, 3, 3, 3]).repeat(4),
    B::add(115, [-3, -3, -3, -3, -3, -3, -3]).repeat(4),
];
const BREATHE_COLOR: [C; 3] = [
    C::load(115, [0, 0, 0, 0]),
    C::add(115, [3, 3, 3, 3]).repeat(4),
    C::add(115, [-3, -3, -3, -3]).repeat(4),
];

const FADE_BANK: [B; 4] = [
    B::load(70, [15, 15, 15, 15, 15, 15, 15]),
    B::add(70, [-1, -1, -1, -1, -1, -1, -1]).repeat(14),
    B::load(70, [0, 0, 0, 0, 0, 0, 0]),
    B::add(70, [1, 1, 1, 1, 1, 1, 1]).repeat(14),
];
const FADE_COLOR: [C; 4] = [
    C::load(70, [15, 15, 0, 0]),
    C::add(70, [-1, -1, 1, 1]).repeat(14),
    C::load(70, [0, 0, 15, 15]),
    C::add(70, [1, 1, -1, -1]).repeat(14),
];

const WAVE_BANK: [B; 14] = [
    B::load(125, [0, 0, 0, 0, 0, 0, 0]),
    B::load(125, [0, 0, 3, 0, 0, 0, 0]),
    B::load(125, [0, 3, 6, 3, 0, 0, 0]),
    B::load(125, [3, 6, 9, 6, 3, 0, 0]),
    B::load(125, [6, 9, 12, 9, 6, 3, 0]),
    B::load(125, [9, 12, 15, 12, 9, 6, 3]),
    B::load(125, [12, 15, 15, 15, 12, 9, 6]),
    B::load(125, [15, 15, 12, 15, 15, 12, 9]),
    B::load(125, [15, 12, 9, 12, 15, 15, 12]),
    B::load(125, [12, 9, 6, 9, 12, 15, 15]),
    B::add(125, [-3, -3, -3, -3, -3, -3, -3]).repeat(1),
    B::load(125, [3, 0, 0, 0, 3, 6, 9]),
    B::load(125, [0, 0, 0, 0, 0, 3, 6]),
    B::load(125, [0, 0, 0, 0, 0, 0, 3]),
];
const WAVE_COLOR: [C; 10] = [
    C::load(250, [0, 0, 0, 0]),
    C::load(125, [0, 0, 3, 0]),
    C::load(125, [0, 3, 6, 0]),
    C::add(125, [3, 3, 3, 2]).repeat(2),
    C::load(125, [12, 15, 15, 8]),
    C::load(125, [15, 15, 12, 8]),
    C::load(125, [15, 12, 9, 8]),
    C::add(125, [-3, -3, -3, -2]).repeat(2),
    C::load(125, [3, 0, 0, 0]),
    C::load(250, [0, 0, 0, 0]),
];

const FLASH_BANK: [B; 4] = [
    B::load(1525, [0, 0, 0, 0, 0, 0, 0]),
    B::add(75, [3, 3, 3, 3, 3, 3, 3]).repeat(4),
    B::add(75, [-3, -3, -3, -3, -3, -3, -3]).repeat(4),
    B::load(450, [0, 0, 0, 0, 0, 0, 0]),
];
const FLASH_COLOR: [C; 7] = [
    C::load(75, [0, 0, 0, 0]),
    C::add(75, [3, 0, 0, 0]).repeat(4),
    C::add(75, [-3, 0, 0, 0]).repeat(4),
    C::add(75, [0, 3, 0, 0]).repeat(4),
    C::add(75, [0, -3, 0, 0]).repeat(4),
    C::load(750, [0, 0, 0, 0]),
    C::load(450, [0, 0, 15, 15]),
];

const SUNRISE_BANK: [B; 10] = [
    B::load(120, [0, 0, 0, 0, 0, 0, 0]),
    B::load(120, [0, 0, 0, 0, 0, 0, 3]),
    B::load(120, [0, 0, 0, 0, 0, 3, 6]),
    B::load(120, [3, 0, 0, 0, 3, 6, 9]),
    B::load(120, [6, 3, 0, 3, 6, 9, 12]),
    B::load(120, [9, 6, 3, 6, 9, 12, 15]),
    B::load(120, [12, 9, 6, 9, 12, 15, 15]),
    B::load(120, [15, 12, 9, 12, 15, 15, 15]),
    B::load(120, [15, 15, 12, 15, 15, 15, 15]),
    B::load(840, [15, 15, 15, 15, 15, 15, 15]),
];
const SUNRISE_COLOR: [C; 10] = [
    C::load(120, [0, 0, 0, 1]),
    C::load(120, [0, 0, 0, 3]),
    C::load(120, [0, 0, 0, 3]),
    C::load(120, [0, 0, 3, 6]),
    C::load(120, [0, 0, 3, 6]),
    C::load(120, [0, 3, 6, 9]),
    C::load(120, [0, 3, 6, 9]),
    C::load(120, [3, 6, 9, 12]),
    C::load(120, [6, 9, 12, 12]),
    C::load(840, [12, 12, 12, 12]),
];

const CHASE_BANK: [B; 7] = [
    B::load(220, [15, 10, 5, 0, 0, 5, 10]),
    B::load(220, [10, 15, 10, 5, 0, 0, 5]),
    B::load(220, [5, 10, 15, 10, 5, 0, 0]),
    B::load(220, [0, 5, 10, 15, 10, 5, 0]),
    B::load(220, [0, 0, 5, 10, 15, 10, 5]),
    B::load(220, [5, 0, 0, 5, 10, 15, 10]),
    B::load(110, [10, 5, 0, 0, 5, 10, 15]),
];
const CHASE_COLOR: [C; 5] = [
    C::load(110, [15, 0, 0, 15]),
    C::add(110, [0, 5, 0, -5]).repeat(2),
    C::add(110, [-5, 0, 5, 0]).repeat(2),
    C::add(110, [0, -5, 0, 5]).repeat(2),
    C::add(110, [5, 0, -5, 0]).repeat(2),
];

const BLACKNESS_BANK: [B; 1] = [B::load(u16::MAX, [0, 0, 0, 0, 0, 0, 0])];
const BLACKNESS_COLOR: [C; 1] = [C::load(u16::MAX, [0, 0, 0, 0])];

const ANIMATIONS: [Animation<'static>; 8] = [
    valid(Animation::new("kitt", &KITT_BANK, &KITT_COLOR)),
    valid(Animation::new("breathe", &BREATHE_BANK, &BREATHE_COLOR)),
    valid(Animation::new("fade", &FADE_BANK, &FADE_COLOR)),
    valid(Animation::new("wave", &WAVE_BANK, &WAVE_COLOR)),
    valid(Animation::new("flash", &FLASH_BANK, &FLASH_COLOR)),
    valid(Animation::new("sunrise", &SUNRISE_BANK, &SUNRISE_COLOR)),
    valid(Animation::new("chase", &CHASE_BANK, &CHASE_COLOR)),
    valid(Animation::new("blackness", &BLACKNESS_BANK, &BLACKNESS_COLOR)),
];

/// Index of the all-dark animation played before power down
#[allow(clippy::cast_possible_truncation)]
pub const BLACKNESS: u8 = (ANIMATIONS.len() - 1) as u8;

/// Catalog of every built-in animation
pub const BUILTIN: Catalog<'static> = valid_catalog(Catalog::new(&ANIMATIONS));
