//! Standby reminders ahead of a pass.
//!
//! At fixed lead times before the pass starts the standby screen scrolls a
//! short label (`1D`, `12H`, ... `2M`). [`Reminders`] tracks which of them are
//! still pending for the current pass.
//!
//! # Firing Rules
//!
//! - A reminder fires at most once, in descending lead order.
//! - Leads already passed when standby begins are dropped up front, so a pass
//!   found 90 minutes ahead starts with `1H`, not with a burst of stale labels.
//! - When several leads are crossed between two polls (a long tick, a clock
//!   jump) only the largest fires; the smaller crossed ones are consumed.

use chrono::TimeDelta;

/// One reminder: how long before the pass start it fires, and what it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub lead: TimeDelta,
    pub label: &'static str,
}

impl Reminder {
    const fn new(lead: TimeDelta, label: &'static str) -> Self {
        Self { lead, label }
    }
}

const fn hours(n: i64) -> TimeDelta {
    TimeDelta::seconds(n * 3600)
}

const fn minutes(n: i64) -> TimeDelta {
    TimeDelta::seconds(n * 60)
}

/// Reminder table in descending lead order.
pub const REMINDERS: [Reminder; 12] = [
    Reminder::new(hours(24), "1D"),
    Reminder::new(hours(12), "12H"),
    Reminder::new(hours(6), "6H"),
    Reminder::new(hours(3), "3H"),
    Reminder::new(hours(2), "2H"),
    Reminder::new(hours(1), "1H"),
    Reminder::new(minutes(45), "45M"),
    Reminder::new(minutes(30), "30M"),
    Reminder::new(minutes(15), "15M"),
    Reminder::new(minutes(10), "10M"),
    Reminder::new(minutes(5), "5M"),
    Reminder::new(minutes(2), "2M"),
];

/// Pending reminders for one pass.
#[derive(Clone, Debug)]
pub struct Reminders {
    /// Index of the next reminder that may fire.
    next: usize,
}

impl Reminders {
    /// Reminders for a pass that starts `remaining` from now.
    ///
    /// Leads above `remaining` have already passed and never fire. A lead equal
    /// to `remaining` is due right away.
    pub fn new(remaining: TimeDelta) -> Self {
        let next = REMINDERS.iter().position(|r| r.lead <= remaining).unwrap_or(REMINDERS.len());
        Self { next }
    }

    /// Fire the reminder due at `remaining` time before the pass, if any.
    pub fn poll(&mut self, remaining: TimeDelta) -> Option<Reminder> {
        let crossed = REMINDERS[self.next..].iter().take_while(|r| r.lead >= remaining).count();
        if crossed == 0 {
            return None;
        }
        let fired = REMINDERS[self.next];
        self.next += crossed;
        Some(fired)
    }

    /// Number of reminders that may still fire.
    #[inline]
    pub fn pending(&self) -> usize {
        REMINDERS.len() - self.next
    }
}
