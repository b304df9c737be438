//! Opcode interpreter
//!
//! Applies the brightness effect of a single instruction to a level vector.
//! Timeline control (`REPEAT`) is handled by [`crate::playback`].

use crate::diffusion::{Arcs, Flow};
use crate::instruction::Instruction;
use crate::level;
use crate::opcode::Opcode;

/// Shape of the LED group an instruction is applied to
///
/// Rotation and diffusion only make sense on the linear bank; on the color LED
/// those bits are accepted and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Ring of LEDs split into two arcs
    Ring(Arcs),
    /// Independent channels of one LED
    Channels,
}

/// Apply the instruction's brightness effect
///
/// `LOAD` replaces the vector. Any other combination runs the set bits in
/// [`Opcode::EFFECT_ORDER`].
pub fn execute<const N: usize>(
    levels: &mut [u8; N],
    instruction: &Instruction<N>,
    topology: Topology,
) {
    let opcode = instruction.opcode;
    if opcode.is_load() {
        for (level, operand) in levels.iter_mut().zip(instruction.operands.iter()) {
            *level = level::from_operand(*operand);
        }
        return;
    }

    for step in Opcode::EFFECT_ORDER {
        if opcode.contains(step) {
            apply(levels, &instruction.operands, step, topology);
        }
    }
}

fn apply<const N: usize>(levels: &mut [u8; N], operands: &[i8; N], step: Opcode, topology: Topology) {
    match (step, topology) {
        (Opcode::ADD, _) => {
            for (level, delta) in levels.iter_mut().zip(operands.iter()) {
                *level = level::wrapping_add(*level, *delta);
            }
        }
        (Opcode::DIV, _) => {
            for (level, divisor) in levels.iter_mut().zip(operands.iter()) {
                *level = level::divide(*level, *divisor);
            }
        }
        (Opcode::RSHIFT, Topology::Ring(_)) => levels.rotate_right(1),
        (Opcode::LSHIFT, Topology::Ring(_)) => levels.rotate_left(1),
        (Opcode::USOURCE, Topology::Ring(arcs)) => arcs.diffuse(levels, operands, Flow::Upward),
        (Opcode::DSOURCE, Topology::Ring(arcs)) => arcs.diffuse(levels, operands, Flow::Downward),
        _ => {}
    }
}
