//! Frame scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::control::ControlReceiver;
use crate::engine::Engine;
use crate::selection::SelectionStore;
use crate::OutputDriver;

/// Default engine tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable scheduler that paces the engine without async.
///
/// This scheduler:
/// - Applies queued control requests
/// - Ticks the engine and pushes the levels to the output driver
/// - Tracks frame timing with drift correction
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine, driver, CONTROLS.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, S: SelectionStore, const QUEUE_SIZE: usize> {
    output: O,
    engine: Engine<'a, S>,
    controls: ControlReceiver<'a, QUEUE_SIZE>,
    next_frame: Instant,
    tick_period: Duration,
}

impl<'a, O: OutputDriver, S: SelectionStore, const QUEUE_SIZE: usize>
    FrameScheduler<'a, O, S, QUEUE_SIZE>
{
    /// Create a new scheduler ticking every [`DEFAULT_TICK_PERIOD`].
    pub fn new(engine: Engine<'a, S>, driver: O, controls: ControlReceiver<'a, QUEUE_SIZE>) -> Self {
        Self::with_tick_period(engine, driver, controls, DEFAULT_TICK_PERIOD)
    }

    /// Create a new scheduler with a custom tick period.
    pub fn with_tick_period(
        engine: Engine<'a, S>,
        driver: O,
        controls: ControlReceiver<'a, QUEUE_SIZE>,
        tick_period: Duration,
    ) -> Self {
        Self {
            output: driver,
            engine,
            controls,
            next_frame: Instant::from_millis(0),
            tick_period,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after a long stall instead of catching up
        let max_drift = self.tick_period.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        self.controls.drain_into(&mut self.engine);
        self.engine.tick_at(now);
        self.output
            .write(self.engine.bank_levels(), self.engine.color_levels());

        self.next_frame += self.tick_period;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &Engine<'a, S> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut Engine<'a, S> {
        &mut self.engine
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }
}
