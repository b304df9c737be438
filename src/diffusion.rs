//! Overflow diffusion across the two arcs of the LED bank
//!
//! The bank is laid out as two rows meeting at a corner. The split point is the
//! index of the first LED of the right arc: the left arc is `0..split` and the
//! right arc is `split..N`. A source operation adds its operands channel by
//! channel and lets whatever does not fit flow into the next LED of the arc,
//! until the last LED of the arc swallows the remainder.

use heapless::Vec;

use crate::level::{MAX_LEVEL, saturate};

/// Direction a source operation carries overflow in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Toward the split point, away from the junction of the first and last LED (`USOURCE`)
    Upward,
    /// Away from the split point, toward the junction of the first and last LED (`DSOURCE`)
    Downward,
}

/// Split position of the bank into two arcs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arcs {
    split: usize,
}

impl Arcs {
    /// Create arcs for a bank of `len` LEDs
    ///
    /// Both arcs must hold at least one LED.
    pub const fn new(split: usize, len: usize) -> Option<Self> {
        if split == 0 || split >= len {
            return None;
        }
        Some(Self { split })
    }

    /// Index of the first LED of the right arc
    pub const fn split(self) -> usize {
        self.split
    }

    /// Add `operands` to `levels`, cascading overflow along both arcs
    pub fn diffuse<const N: usize>(self, levels: &mut [u8; N], operands: &[i8; N], flow: Flow) {
        let mut work = [0i16; N];
        for (wide, level) in work.iter_mut().zip(levels.iter()) {
            *wide = i16::from(*level);
        }

        let split = self.split.min(N);
        let (left, right): (Vec<usize, N>, Vec<usize, N>) = match flow {
            Flow::Upward => ((0..split).collect(), (split..N).rev().collect()),
            Flow::Downward => ((0..split).rev().collect(), (split..N).collect()),
        };
        cascade(&mut work, operands, &left);
        cascade(&mut work, operands, &right);

        for (level, wide) in levels.iter_mut().zip(work.iter()) {
            *level = u8::try_from(*wide).map_or(0, |value| value.min(MAX_LEVEL));
        }
    }
}

/// Run one chain of the diffusion
///
/// `chain` lists LED indices in flow order. Each LED except the last receives
/// its operand, then the whole remaining chain is saturated with every excess
/// handed to the following LED. The last LED receives its operand and is
/// saturated on its own, its excess is dropped.
fn cascade<const N: usize>(work: &mut [i16; N], operands: &[i8; N], chain: &[usize]) {
    let Some((&last, body)) = chain.split_last() else {
        return;
    };

    for (start, &index) in body.iter().enumerate() {
        work[index] += i16::from(operands[index]);
        for position in start..body.len() {
            let excess = saturate(&mut work[chain[position]]);
            work[chain[position + 1]] += excess;
        }
    }

    work[last] += i16::from(operands[last]);
    saturate(&mut work[last]);
}
