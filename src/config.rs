//! Application configuration constants.
//!
//! Board geometry, tick lengths and phase durations are compile-time constants.
//! The phase durations that callers may want to change (tests run with zero
//! countdown/setup, the JSON config can override them) are gathered into
//! [`Timing`], which defaults to the constants below.

use std::time::Duration;

use chrono::TimeDelta;

// =============================================================================
// Board Configuration
// =============================================================================

/// Width and height of the LED matrix in cells.
pub const BOARD_SIZE: usize = 8;

/// Total number of cells (8x8, row-major).
pub const PIXEL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Board center in cell coordinates. Cell centers sit on integer coordinates,
/// so the geometric center of an 8x8 board is between cells 3 and 4.
pub const BOARD_CENTER: f64 = 3.5;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Animation tick while something moves on the board.
pub const FRAME_TIME: Duration = Duration::from_millis(100);

/// Tick while idling in SEARCH/STANDBY with nothing animating.
pub const IDLE_FRAME_TIME: Duration = Duration::from_millis(500);

/// Step used while spinning up to the countdown start.
pub const SPIN_STEP: Duration = Duration::from_millis(10);

/// Delay between two polls of the pass source while searching.
pub const SEARCH_RETRY_SECS: i64 = 60;

/// Length of the countdown pie animation.
pub const COUNTDOWN_SECS: i64 = 60;

/// Length of the orientation blink between countdown and pass start.
pub const SETUP_SECS: i64 = 20;

/// Half-period of the setup orientation blink.
pub const SETUP_BLINK: Duration = Duration::from_millis(500);

/// Half-period of the search corner blink.
pub const SEARCH_BLINK: Duration = Duration::from_secs(1);

/// Period of the standby heartbeat.
pub const HEARTBEAT_PERIOD: Duration = Duration::from_secs(4);

/// Portion of the heartbeat period during which the status pixel pulses.
pub const HEARTBEAT_PULSE: Duration = Duration::from_secs(1);

/// How long a reminder notification scrolls across the board.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Countdown digits are only drawn below this many seconds (two glyphs fit).
pub const COUNTDOWN_DIGITS_BELOW: i64 = 100;

// =============================================================================
// Fixture Pass
// =============================================================================

/// Lead between the call time and the fixture pass start.
pub const FIXTURE_LEAD_SECS: i64 = 2;

/// Spacing between fixture pass samples (start -> high -> end).
pub const FIXTURE_LEG_SECS: i64 = 5;

// =============================================================================
// Runtime Timing
// =============================================================================

/// Phase durations and tick lengths used by the phase machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Length of the countdown pie.
    pub countdown: TimeDelta,
    /// Length of the setup orientation blink.
    pub setup: TimeDelta,
    /// Delay between polls while searching.
    pub search_retry: TimeDelta,
    /// Animation tick.
    pub frame: TimeDelta,
    /// Idle tick.
    pub idle_frame: TimeDelta,
}

impl Timing {
    /// Timing with custom countdown and setup lengths, other fields defaulted.
    pub fn with_phases(countdown: TimeDelta, setup: TimeDelta) -> Self {
        Self { countdown, setup, ..Self::default() }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            countdown: TimeDelta::seconds(COUNTDOWN_SECS),
            setup: TimeDelta::seconds(SETUP_SECS),
            search_retry: TimeDelta::seconds(SEARCH_RETRY_SECS),
            frame: to_delta(FRAME_TIME),
            idle_frame: to_delta(IDLE_FRAME_TIME),
        }
    }
}

/// Convert a std duration constant into a chrono delta.
#[inline]
pub fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::milliseconds(duration.as_millis() as i64)
}

/// Seconds in a delta as a float, with microsecond precision where available.
#[inline]
pub fn seconds(delta: TimeDelta) -> f64 {
    delta
        .num_microseconds()
        .map_or_else(|| delta.num_milliseconds() as f64 / 1e3, |us| us as f64 / 1e6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_dimensions() {
        assert_eq!(PIXEL_COUNT, 64);
        assert!((BOARD_CENTER - (BOARD_SIZE as f64 - 1.0) / 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timing_default() {
        let timing = Timing::default();
        assert_eq!(timing.countdown, TimeDelta::seconds(COUNTDOWN_SECS));
        assert_eq!(timing.setup, TimeDelta::seconds(SETUP_SECS));
        assert_eq!(timing.frame, TimeDelta::milliseconds(100));
        assert_eq!(timing.idle_frame, TimeDelta::milliseconds(500));
    }

    #[test]
    fn test_timing_with_phases() {
        let timing = Timing::with_phases(TimeDelta::zero(), TimeDelta::zero());
        assert_eq!(timing.countdown, TimeDelta::zero());
        assert_eq!(timing.setup, TimeDelta::zero());
        assert_eq!(timing.search_retry, Timing::default().search_retry);
    }

    #[test]
    fn test_seconds() {
        assert!((seconds(TimeDelta::milliseconds(1500)) - 1.5).abs() < 1e-9);
        assert!((seconds(TimeDelta::seconds(-2)) + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_reminders_fit_in_standby() {
        // The shortest reminder must land before standby hands over to the countdown
        let standby_end = COUNTDOWN_SECS + SETUP_SECS;
        assert!(standby_end < 2 * 60);
    }
}
