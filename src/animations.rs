//! Time-driven animation helpers for the phase screens.
//!
//! Everything here is a pure function of elapsed time, so a screen renders the
//! same frame for the same instant regardless of how often it is ticked.
//!
//! - **Search blink**: the corner pixel toggles every [`SEARCH_BLINK`]
//! - **Heartbeat**: a short [`blink`](crate::tween::blink) pulse at the start
//!   of every [`HEARTBEAT_PERIOD`]
//! - **Setup blink**: the pass start marker toggles every [`SETUP_BLINK`]
//! - **Notice scroll**: reminder text slides from the right edge until it has
//!   fully left the board on the left, over [`NOTICE_DURATION`]
//!
//! ```text
//! heartbeat   /\________/\________/\____
//!             |<-pulse->|
//!             |<----- period ---->|
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::{
    BOARD_SIZE,
    HEARTBEAT_PERIOD,
    HEARTBEAT_PULSE,
    NOTICE_DURATION,
    SEARCH_BLINK,
    SETUP_BLINK,
    seconds,
    to_delta,
};
use crate::font::text_width;
use crate::tween;

// =============================================================================
// Blinks
// =============================================================================

/// Whether a square wave with the given half-period is in its "on" half.
///
/// The wave starts "on" at zero elapsed time.
#[inline]
fn square_wave(elapsed: TimeDelta, half_period: Duration) -> bool {
    let half = to_delta(half_period).num_milliseconds().max(1);
    elapsed.num_milliseconds().rem_euclid(2 * half) < half
}

/// Search corner pixel state.
#[inline]
pub fn search_blink_on(elapsed: TimeDelta) -> bool {
    square_wave(elapsed, SEARCH_BLINK)
}

/// Whether the setup screen shows the pass start marker.
#[inline]
pub fn setup_marker_on(elapsed: TimeDelta) -> bool {
    square_wave(elapsed, SETUP_BLINK)
}

/// Position inside the heartbeat period, if a pulse is in progress.
fn heartbeat_phase(elapsed: TimeDelta) -> Option<f64> {
    let period = to_delta(HEARTBEAT_PERIOD).num_milliseconds().max(1);
    let pulse = to_delta(HEARTBEAT_PULSE).num_milliseconds().max(1);
    let phase = elapsed.num_milliseconds().rem_euclid(period);
    (phase < pulse).then(|| phase as f64 / pulse as f64)
}

/// Standby heartbeat intensity in `[0, 1]`.
pub fn heartbeat(elapsed: TimeDelta) -> f64 {
    heartbeat_phase(elapsed).map_or(0.0, |x| tween::blink(x).max(0.0))
}

/// Whether a heartbeat pulse is in progress and needs animation ticks.
#[inline]
pub fn heartbeat_active(elapsed: TimeDelta) -> bool {
    heartbeat_phase(elapsed).is_some()
}

// =============================================================================
// Scrolling Notice
// =============================================================================

/// A transient scrolling text notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Text to scroll.
    pub text: &'static str,
    /// When the notice started.
    pub since: DateTime<Utc>,
}

impl Notice {
    pub const fn new(text: &'static str, since: DateTime<Utc>) -> Self {
        Self { text, since }
    }

    /// Whether the notice has finished scrolling at `now`.
    #[inline]
    pub fn is_done(&self, now: DateTime<Utc>) -> bool {
        now - self.since >= to_delta(NOTICE_DURATION)
    }

    /// Left edge of the text at `now`, or `None` once the notice is over.
    ///
    /// Starts just right of the board and ends with the last column just past
    /// the left edge.
    pub fn offset(&self, now: DateTime<Utc>) -> Option<i32> {
        if self.is_done(now) {
            return None;
        }
        let x = (seconds(now - self.since) / seconds(to_delta(NOTICE_DURATION))).clamp(0.0, 1.0);
        let start = BOARD_SIZE as f64;
        let travel = start + f64::from(text_width(self.text));
        Some((start - x * travel).round() as i32)
    }
}
