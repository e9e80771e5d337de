//! Tracker phases.
//!
//! The tracker cycles through five phases, one pass per cycle:
//!
//! - [`Phase::Search`]: polling the source for a pass that has not ended yet
//! - [`Phase::Standby`]: waiting for the pass, heartbeat and reminders
//! - [`Phase::Countdown`]: pie wedge shrinking towards the setup start
//! - [`Phase::Setup`]: blinking north and start markers to orient the viewer
//! - [`Phase::Monitor`]: live satellite position while the pass is on

use core::fmt;

/// Phase of the tracking cycle.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Phase {
    #[default]
    Search,
    Standby,
    Countdown,
    Setup,
    Monitor,
}

impl Phase {
    /// Phase that follows this one (Monitor wraps to Search).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::Standby,
            Self::Standby => Self::Countdown,
            Self::Countdown => Self::Setup,
            Self::Setup => Self::Monitor,
            Self::Monitor => Self::Search,
        }
    }

    /// Whether a pass is held during this phase.
    #[inline]
    pub const fn has_pass(self) -> bool {
        !matches!(self, Self::Search)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "SEARCH",
            Self::Standby => "STANDBY",
            Self::Countdown => "COUNTDOWN",
            Self::Setup => "SETUP",
            Self::Monitor => "MONITOR",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
