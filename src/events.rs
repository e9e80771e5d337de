//! In-memory journal of tracker events.
//!
//! Every phase change, reminder and source poll is logged through the `log`
//! facade and also kept in a small ring buffer, so the most recent history can
//! be inspected (by tests, or printed on exit) without a log subscriber.
//!
//! # Usage
//!
//! ```ignore
//! let mut events = EventLog::new();
//! events.push(now, EventKind::PhaseEntered(Phase::Standby));
//! for event in events.iter() {
//!     println!("{event}");
//! }
//! ```

use core::fmt;

use chrono::{DateTime, Utc};
use heapless::Deque;

use crate::phase::Phase;

/// Number of events kept; the oldest is dropped when full.
pub const EVENT_LOG_SIZE: usize = 32;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The tracker entered a phase.
    PhaseEntered(Phase),
    /// A standby reminder fired.
    Reminder(&'static str),
    /// The source was polled and returned this many passes.
    Polled { count: usize },
}

/// A timestamped event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub at: DateTime<Utc>,
    pub kind: EventKind,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.at.format("%Y-%m-%d %H:%M:%S%.3f");
        match self.kind {
            EventKind::PhaseEntered(phase) => write!(f, "{at} entered {phase}"),
            EventKind::Reminder(label) => write!(f, "{at} reminder {label}"),
            EventKind::Polled { count } => write!(f, "{at} polled, {count} passes"),
        }
    }
}

/// Ring buffer of the latest [`EVENT_LOG_SIZE`] events.
pub struct EventLog {
    buffer: Deque<Event, EVENT_LOG_SIZE>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self { buffer: Deque::new() }
    }

    /// Record an event, dropping the oldest if full.
    pub fn push(&mut self, at: DateTime<Utc>, kind: EventKind) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(Event { at, kind }).ok();
    }

    /// Events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.buffer.iter()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&Event> {
        self.buffer.back()
    }

    /// Phases entered, oldest first, with their timestamps.
    pub fn phases(&self) -> impl Iterator<Item = (DateTime<Utc>, Phase)> + '_ {
        self.buffer.iter().filter_map(|e| match e.kind {
            EventKind::PhaseEntered(phase) => Some((e.at, phase)),
            _ => None,
        })
    }

    /// Reminder labels fired, oldest first.
    pub fn reminders(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.buffer.iter().filter_map(|e| match e.kind {
            EventKind::Reminder(label) => Some(label),
            _ => None,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
