//! Control requests from interrupt context
//!
//! Buttons are usually serviced in an interrupt, but the engine must only be
//! touched from the main loop. Requests are queued in a bounded deque guarded by
//! `critical-section` and drained once per frame.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::engine::Engine;
use crate::selection::SelectionStore;

/// A request to change the playing animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Select the animation with this index
    Select(u8),
    /// Select the next animation, wrapping around
    Next,
}

impl Control {
    /// Apply the request to an engine
    pub fn apply<S: SelectionStore>(self, engine: &mut Engine<'_, S>) {
        match self {
            Self::Select(index) => engine.select(index),
            Self::Next => engine.select_next(),
        }
    }
}

/// Error returned when the queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub Control);

/// Bounded, interrupt-safe queue of control requests
pub struct ControlQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Control, SIZE>>>,
}

impl<const SIZE: usize> ControlQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers, e.g. a button interrupt
    pub const fn sender(&self) -> ControlSender<'_, SIZE> {
        ControlSender { queue: self }
    }

    /// Handle for the main loop
    pub const fn receiver(&self) -> ControlReceiver<'_, SIZE> {
        ControlReceiver { queue: self }
    }

    /// Queue a request
    ///
    /// Returns `Err(QueueFull(control))` if the queue is full.
    pub fn try_send(&self, control: Control) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(control).map_err(QueueFull)
        })
    }

    /// Take the oldest request, if any
    pub fn try_receive(&self) -> Option<Control> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const SIZE: usize> Default for ControlQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`ControlQueue`]
#[derive(Clone, Copy)]
pub struct ControlSender<'a, const SIZE: usize> {
    queue: &'a ControlQueue<SIZE>,
}

impl<const SIZE: usize> ControlSender<'_, SIZE> {
    pub fn try_send(&self, control: Control) -> Result<(), QueueFull> {
        self.queue.try_send(control)
    }
}

/// Consumer handle of a [`ControlQueue`]
#[derive(Clone, Copy)]
pub struct ControlReceiver<'a, const SIZE: usize> {
    queue: &'a ControlQueue<SIZE>,
}

impl<const SIZE: usize> ControlReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<Control> {
        self.queue.try_receive()
    }

    /// Apply every queued request in order
    ///
    /// Returns how many requests were applied.
    pub fn drain_into<S: SelectionStore>(&self, engine: &mut Engine<'_, S>) -> usize {
        let mut applied = 0;
        while let Some(control) = self.try_receive() {
            control.apply(engine);
            applied += 1;
        }
        applied
    }
}
