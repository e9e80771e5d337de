//! Wall-clock access.
//!
//! The phase machine and the sources never call `Utc::now()` or
//! `thread::sleep` directly; they go through a [`Clock`]. [`SystemClock`] is
//! the real thing, [`SimulatedClock`] is a virtual clock whose `sleep` simply
//! advances time, so a whole pass can be played through in a test instantly.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time and the only way to wait.
pub trait Clock {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Block for `duration`. Non-positive durations return immediately.
    fn sleep(&self, duration: TimeDelta);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn sleep(&self, duration: TimeDelta) {
        (**self).sleep(duration);
    }
}

/// The operating system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: TimeDelta) {
        // to_std fails on negative deltas
        if let Ok(duration) = duration.to_std() {
            thread::sleep(duration);
        }
    }
}

/// Virtual clock advanced only by `sleep` and `advance`.
///
/// Clones share the same time, so a test can keep a handle while the tracker
/// and the source own theirs.
#[derive(Clone, Debug)]
pub struct SimulatedClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl SimulatedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    /// Move time forward (or backward, for negative deltas).
    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn sleep(&self, duration: TimeDelta) {
        if duration > TimeDelta::zero() {
            self.advance(duration);
        }
    }
}
