//! Per-timeline playback state
//!
//! Each LED group keeps its own elapsed time, the index of the instruction it
//! applied last and a repetition counter. The elapsed accumulator may be read
//! from interrupt context, so every update of it is a single critical section.

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

use crate::instruction::Instruction;
use crate::interpreter::{Topology, execute};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TimerState {
    elapsed: u16,
    owed: u16,
}

/// Millisecond accumulator shared with interrupt context
///
/// Moving the timer back never takes it below zero. Time rewound past zero is
/// kept as a debt that later advances repay before the elapsed value grows.
pub struct ElapsedTimer {
    inner: Mutex<Cell<TimerState>>,
}

impl ElapsedTimer {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(TimerState {
                elapsed: 0,
                owed: 0,
            })),
        }
    }

    /// Current value in milliseconds, zero while time is owed
    pub fn get(&self) -> u16 {
        critical_section::with(|cs| self.inner.borrow(cs).get().elapsed)
    }

    /// Milliseconds rewound past zero and not yet repaid
    pub fn owed(&self) -> u16 {
        critical_section::with(|cs| self.inner.borrow(cs).get().owed)
    }

    /// Move the timer forward, repaying any debt first
    pub fn advance(&self, delta: u16) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            let repaid = state.owed.min(delta);
            state.owed -= repaid;
            state.elapsed = state.elapsed.wrapping_add(delta - repaid);
            cell.set(state);
        });
    }

    /// Move the timer back, borrowing time for a repeated instruction
    pub fn rewind(&self, delta: u16) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut state = cell.get();
            if state.elapsed >= delta {
                state.elapsed -= delta;
            } else {
                state.owed = state.owed.saturating_add(delta - state.elapsed);
                state.elapsed = 0;
            }
            cell.set(state);
        });
    }

    pub fn reset(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).set(TimerState::default()));
    }
}

impl fmt::Debug for ElapsedTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = critical_section::with(|cs| self.inner.borrow(cs).get());
        f.debug_struct("ElapsedTimer")
            .field("elapsed", &state.elapsed)
            .field("owed", &state.owed)
            .finish()
    }
}

impl Default for ElapsedTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// What a timeline does once its elapsed time runs past the last instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exhaustion {
    /// Rewind to zero and play instruction 0 again
    Restart,
    /// Keep the last instruction selected
    Hold,
}

/// Result of stepping a timeline once
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Instruction the elapsed time currently points at
    pub index: usize,
    /// The instruction's effect was applied during this step
    pub applied: bool,
    /// The timeline ran out and restarted from zero
    pub restarted: bool,
}

/// Mutable state of one timeline
#[derive(Debug, Default)]
pub struct Playback {
    elapsed: ElapsedTimer,
    last_instruction: Option<usize>,
    repeat_counter: u8,
    repeat_index: usize,
}

impl Playback {
    pub const fn new() -> Self {
        Self {
            elapsed: ElapsedTimer::new(),
            last_instruction: None,
            repeat_counter: 0,
            repeat_index: 0,
        }
    }

    /// Milliseconds elapsed on this timeline
    pub fn elapsed_ms(&self) -> u16 {
        self.elapsed.get()
    }

    /// Milliseconds a `REPEAT` instruction borrowed beyond the timeline start
    pub fn owed_ms(&self) -> u16 {
        self.elapsed.owed()
    }

    /// Index of the most recently completed instruction
    pub const fn last_instruction(&self) -> Option<usize> {
        self.last_instruction
    }

    /// Remaining repetitions of the current `REPEAT` instruction
    pub const fn repeat_counter(&self) -> u8 {
        self.repeat_counter
    }

    pub(crate) fn timer(&self) -> &ElapsedTimer {
        &self.elapsed
    }

    /// Return to the initial condition
    pub(crate) fn reset(&mut self) {
        self.elapsed.reset();
        self.last_instruction = None;
        self.repeat_counter = 0;
        self.repeat_index = 0;
    }

    /// Select the current instruction and apply it if a boundary was crossed
    pub(crate) fn step<const N: usize>(
        &mut self,
        instructions: &[Instruction<N>],
        levels: &mut [u8; N],
        topology: Topology,
        exhaustion: Exhaustion,
    ) -> Step {
        if self.repeat_counter > 0 {
            return self.step_repeat(instructions, levels, topology);
        }

        let (index, restarted) = match locate(instructions, self.elapsed.get()) {
            Some(index) => (index, false),
            None => match exhaustion {
                Exhaustion::Restart => {
                    self.elapsed.reset();
                    (0, true)
                }
                Exhaustion::Hold => (instructions.len().saturating_sub(1), false),
            },
        };
        let mut step = Step {
            index,
            applied: false,
            restarted,
        };

        if self.last_instruction == Some(step.index) {
            return step;
        }
        let Some(instruction) = instructions.get(step.index) else {
            return step;
        };

        execute(levels, instruction, topology);
        step.applied = true;

        if instruction.opcode.is_load() || !instruction.opcode.repeats() {
            self.last_instruction = Some(step.index);
        } else {
            self.repeat(step.index, instruction);
        }
        step
    }

    /// Stay on a `REPEAT` instruction until its remaining applications are done
    ///
    /// The instruction is applied again once the borrowed time is repaid and
    /// the timer is back at the instruction's start offset.
    fn step_repeat<const N: usize>(
        &mut self,
        instructions: &[Instruction<N>],
        levels: &mut [u8; N],
        topology: Topology,
    ) -> Step {
        let index = self.repeat_index;
        let mut step = Step {
            index,
            applied: false,
            restarted: false,
        };
        let Some(instruction) = instructions.get(index) else {
            self.repeat_counter = 0;
            return step;
        };
        if self.elapsed.owed() > 0 || u32::from(self.elapsed.get()) < start_offset(instructions, index)
        {
            return step;
        }

        execute(levels, instruction, topology);
        step.applied = true;
        self.repeat(index, instruction);
        step
    }

    /// Count down a `REPEAT` instruction, borrowing its duration back each time
    fn repeat<const N: usize>(&mut self, index: usize, instruction: &Instruction<N>) {
        if self.repeat_counter == 0 {
            if instruction.operand == 0 {
                self.last_instruction = Some(index);
                return;
            }
            self.repeat_counter = instruction.operand;
            self.repeat_index = index;
            self.elapsed.rewind(instruction.duration_ms);
            return;
        }

        self.repeat_counter -= 1;
        if self.repeat_counter == 0 {
            self.last_instruction = Some(index);
        } else {
            self.elapsed.rewind(instruction.duration_ms);
        }
    }
}

/// Find the instruction active at `elapsed_ms`
///
/// Returns `None` once `elapsed_ms` reaches the total timeline duration.
pub fn locate<const N: usize>(instructions: &[Instruction<N>], elapsed_ms: u16) -> Option<usize> {
    let elapsed_ms = u32::from(elapsed_ms);
    let mut end = 0u32;
    instructions.iter().position(|instruction| {
        end += u32::from(instruction.duration_ms);
        end > elapsed_ms
    })
}

fn start_offset<const N: usize>(instructions: &[Instruction<N>], index: usize) -> u32 {
    instructions
        .iter()
        .take(index)
        .map(|instruction| u32::from(instruction.duration_ms))
        .sum()
}
