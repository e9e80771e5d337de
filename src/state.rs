//! The pass tracking phase machine.
//!
//! [`PassTracker`] owns a pass source, a display sink and a clock, and walks
//! through one cycle per pass:
//!
//! ```text
//!            poll every search_retry
//!   SEARCH ---------------------------+
//!     |  first pass not yet ended     |
//!     v                               |
//!   STANDBY    until start - countdown - setup
//!     v                               |
//!   COUNTDOWN  until start - setup    |
//!     v                               |
//!   SETUP      until start            |
//!     v                               |
//!   MONITOR    until end -------------+
//! ```
//!
//! # Ticks
//!
//! Each phase loops: read the clock, leave if the phase deadline has been
//! reached, otherwise clear the frame, draw the phase screen, present it and
//! sleep. Sleeps last one animation tick (100 ms) while something moves and one
//! idle tick (500 ms) otherwise, and are cut short at the phase deadline so
//! every transition happens on the exact timestamp. With a
//! [`SimulatedClock`](crate::clock::SimulatedClock) a whole cycle therefore
//! replays deterministically.
//!
//! # Late Passes
//!
//! A pass found after its countdown or setup would have begun simply skips
//! those phases (their deadlines are already behind), and a pass already in
//! progress goes straight to MONITOR.
//!
//! # Errors
//!
//! Source and display errors end the cycle and propagate to the caller. An
//! empty source result is not an error, SEARCH just polls again later.
//!
//! # Stopping
//!
//! The stop flag (see [`PassTracker::with_stop`]) is checked before every
//! sleep. Once set, the current phase returns
//! [`TrackerError::Interrupted`], so a [`DisplayGuard`](crate::display::DisplayGuard)
//! around the sink blanks the board on the way out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

use crate::animations::{Notice, heartbeat_active};
use crate::clock::Clock;
use crate::config::{SPIN_STEP, Timing, seconds, to_delta};
use crate::display::DisplaySink;
use crate::error::TrackerError;
use crate::events::{EventKind, EventLog};
use crate::font::Font;
use crate::pass::Pass;
use crate::phase::Phase;
use crate::reminders::Reminders;
use crate::render::Frame;
use crate::screens::{draw_countdown, draw_monitor, draw_search, draw_setup, draw_standby};
use crate::source::PassSource;

/// Drives the board through the phases of each pass.
pub struct PassTracker<S: PassSource, D: DisplaySink, C: Clock> {
    source: S,
    display: D,
    clock: C,
    timing: Timing,
    font: Font,
    frame: Frame,
    /// `None` until the first phase is entered.
    phase: Option<Phase>,
    pass: Option<Pass>,
    events: EventLog,
    stop: Arc<AtomicBool>,
}

impl<S: PassSource, D: DisplaySink, C: Clock> PassTracker<S, D, C> {
    pub fn new(source: S, display: D, clock: C, timing: Timing) -> Self {
        Self {
            source,
            display,
            clock,
            timing,
            font: Font::decode(),
            frame: Frame::new(),
            phase: None,
            pass: None,
            events: EventLog::new(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a stop flag, typically set from a Ctrl-C handler.
    #[must_use]
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase.unwrap_or_default()
    }

    /// Pass being tracked, if any.
    #[inline]
    pub const fn current_pass(&self) -> Option<&Pass> {
        self.pass.as_ref()
    }

    /// Recent phase, reminder and poll events.
    #[inline]
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    #[inline]
    pub const fn display(&self) -> &D {
        &self.display
    }

    #[inline]
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    // =========================================================================
    // Cycle
    // =========================================================================

    /// Track passes until an error occurs or a stop is requested.
    pub fn run(&mut self) -> Result<(), TrackerError> {
        loop {
            self.run_cycle()?;
        }
    }

    /// Search for the next pass and track it to the end.
    pub fn run_cycle(&mut self) -> Result<(), TrackerError> {
        let pass = self.search()?;
        self.track(pass)
    }

    /// Track a known pass from STANDBY to the end of MONITOR, then return to
    /// SEARCH with a blank board.
    pub fn track(&mut self, pass: Pass) -> Result<(), TrackerError> {
        self.pass = Some(pass);
        self.standby(&pass)?;
        self.countdown(&pass)?;
        self.setup(&pass)?;
        self.monitor(&pass)?;
        self.finish()
    }

    // =========================================================================
    // Phases
    // =========================================================================

    /// Poll the source until it yields a pass that has not ended yet.
    fn search(&mut self) -> Result<Pass, TrackerError> {
        self.enter(Phase::Search);
        let began = self.clock.now();
        let mut next_poll = began;

        loop {
            let now = self.clock.now();
            if now >= next_poll {
                let passes = self.source.list_visible_passes()?;
                log::debug!("{} returned {} passes", self.source.name(), passes.len());
                self.events.push(now, EventKind::Polled { count: passes.len() });

                // The poll itself may have taken a while
                let now = self.clock.now();
                if let Some(pass) = passes.into_iter().find(|p| !p.has_ended(now)) {
                    if pass.is_visible(now) {
                        log::info!("pass already in progress: {pass}");
                    } else {
                        log::info!("next pass: {pass}");
                    }
                    return Ok(pass);
                }
                next_poll = now + self.timing.search_retry;
                log::debug!("no upcoming pass, polling again at {next_poll}");
            }

            self.frame.clear();
            draw_search(&mut self.frame, now - began);
            self.display.present(&self.frame)?;
            self.wait(self.timing.idle_frame, next_poll)?;
        }
    }

    /// Heartbeat and reminders until the countdown begins.
    fn standby(&mut self, pass: &Pass) -> Result<(), TrackerError> {
        self.enter(Phase::Standby);
        let countdown_start = pass.start.time - self.timing.countdown - self.timing.setup;
        let began = self.clock.now();
        let mut reminders = Reminders::new(pass.start.time - began);
        let mut notice: Option<Notice> = None;

        loop {
            let now = self.clock.now();
            if now >= countdown_start {
                return Ok(());
            }

            if let Some(reminder) = reminders.poll(pass.start.time - now) {
                log::info!("reminder {}: pass starts at {}", reminder.label, pass.start.time);
                self.events.push(now, EventKind::Reminder(reminder.label));
                notice = Some(Notice::new(reminder.label, now));
            }
            let scrolling = notice.and_then(|n| n.offset(now).map(|x| (n.text, x)));
            if scrolling.is_none() {
                notice = None;
            }

            let elapsed = now - began;
            self.frame.clear();
            draw_standby(&mut self.frame, &self.font, elapsed, scrolling);
            self.display.present(&self.frame)?;

            let tick = if scrolling.is_some() || heartbeat_active(elapsed) {
                self.timing.frame
            } else {
                self.timing.idle_frame
            };
            self.wait(tick, countdown_start)?;
        }
    }

    /// Pie wedge from the countdown start to the setup start.
    fn countdown(&mut self, pass: &Pass) -> Result<(), TrackerError> {
        self.enter(Phase::Countdown);
        let setup_start = pass.start.time - self.timing.setup;
        let countdown_start = setup_start - self.timing.countdown;

        while self.clock.now() < countdown_start {
            self.wait(to_delta(SPIN_STEP), countdown_start)?;
        }

        let length = seconds(self.timing.countdown);
        loop {
            let now = self.clock.now();
            if now >= setup_start {
                return Ok(());
            }

            let remaining = setup_start - now;
            let fill = if length > 0.0 { seconds(remaining) / length } else { 0.0 };
            self.frame.clear();
            draw_countdown(&mut self.frame, &self.font, fill, remaining);
            self.display.present(&self.frame)?;
            self.wait(self.timing.frame, setup_start)?;
        }
    }

    /// Orientation blink until the pass starts.
    fn setup(&mut self, pass: &Pass) -> Result<(), TrackerError> {
        self.enter(Phase::Setup);
        let began = self.clock.now();

        loop {
            let now = self.clock.now();
            if now >= pass.start.time {
                return Ok(());
            }

            self.frame.clear();
            draw_setup(&mut self.frame, pass.start.azimuth, now - began);
            self.display.present(&self.frame)?;
            self.wait(self.timing.frame, pass.start.time)?;
        }
    }

    /// Live position until the pass ends.
    fn monitor(&mut self, pass: &Pass) -> Result<(), TrackerError> {
        self.enter(Phase::Monitor);

        loop {
            let now = self.clock.now();
            if pass.has_ended(now) {
                return Ok(());
            }

            self.frame.clear();
            draw_monitor(&mut self.frame, pass.track(now));
            self.display.present(&self.frame)?;
            self.wait(self.timing.frame, pass.end.time)?;
        }
    }

    /// Blank the board and go back to searching.
    fn finish(&mut self) -> Result<(), TrackerError> {
        self.frame.clear();
        self.display.clear()?;
        self.enter(self.phase().next());
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn enter(&mut self, phase: Phase) {
        if self.phase == Some(phase) {
            return;
        }
        let now = self.clock.now();
        log::info!("entering {phase}");
        self.phase = Some(phase);
        if !phase.has_pass() {
            self.pass = None;
        }
        self.events.push(now, EventKind::PhaseEntered(phase));
    }

    /// Sleep one tick, but never past `deadline`.
    fn wait(&self, tick: TimeDelta, deadline: DateTime<Utc>) -> Result<(), TrackerError> {
        if self.stop.load(Ordering::Relaxed) {
            return Err(TrackerError::Interrupted);
        }
        let left = deadline - self.clock.now();
        self.clock.sleep(tick.min(left));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use chrono::TimeZone;

    use super::*;
    use crate::clock::SimulatedClock;
    use crate::colors::{RED, scale};
    use crate::display::{DisplayGuard, MemoryDisplay};
    use crate::error::{DisplayError, SourceError};
    use crate::pass::Sample;
    use crate::source::FixtureSource;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap()
    }

    fn secs(n: i64) -> TimeDelta {
        TimeDelta::seconds(n)
    }

    fn zero_phases() -> Timing {
        Timing::with_phases(TimeDelta::zero(), TimeDelta::zero())
    }

    fn pass_at(start: DateTime<Utc>) -> Pass {
        Pass::new(
            Sample::new(start, 10.0, 180.0),
            Sample::new(start + secs(5), 90.0, 270.0),
            Sample::new(start + secs(10), 10.0, 112.5),
        )
        .unwrap()
    }

    /// Source answering from a fixed script, then with empty lists.
    struct Scripted {
        responses: VecDeque<Result<Vec<Pass>, SourceError>>,
    }

    impl Scripted {
        fn new(responses: impl IntoIterator<Item = Result<Vec<Pass>, SourceError>>) -> Self {
            Self { responses: responses.into_iter().collect() }
        }
    }

    impl PassSource for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn list_visible_passes(&mut self) -> Result<Vec<Pass>, SourceError> {
            self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Sink keeping every frame.
    #[derive(Default)]
    struct History {
        frames: Vec<Frame>,
        clears: usize,
    }

    impl DisplaySink for History {
        fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            self.clears += 1;
            Ok(())
        }
    }

    /// Sink that fails after a number of frames.
    struct Failing {
        left: usize,
    }

    impl DisplaySink for Failing {
        fn present(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
            if self.left == 0 {
                return Err(DisplayError::Closed);
            }
            self.left -= 1;
            Ok(())
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    /// Sink that requests a stop after a number of frames.
    struct StopAfter {
        frames: usize,
        stop: Arc<AtomicBool>,
        board: MemoryDisplay,
    }

    impl DisplaySink for StopAfter {
        fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
            self.board.present(frame)?;
            self.frames = self.frames.saturating_sub(1);
            if self.frames == 0 {
                self.stop.store(true, Ordering::Relaxed);
            }
            Ok(())
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            self.board.clear()
        }
    }

    #[test]
    fn test_fixture_cycle_end_to_end() {
        let clock = SimulatedClock::new(t0());
        let mut tracker =
            PassTracker::new(FixtureSource::new(clock.clone()), MemoryDisplay::new(), clock.clone(), zero_phases());

        tracker.run_cycle().unwrap();

        let phases: Vec<_> = tracker.events().phases().collect();
        assert_eq!(
            phases,
            [
                (t0(), Phase::Search),
                (t0(), Phase::Standby),
                (t0() + secs(2), Phase::Countdown),
                (t0() + secs(2), Phase::Setup),
                (t0() + secs(2), Phase::Monitor),
                (t0() + secs(12), Phase::Search),
            ]
        );
        assert_eq!(clock.now(), t0() + secs(12));
        assert_eq!(tracker.phase(), Phase::Search);
        assert!(tracker.current_pass().is_none());
        assert!(tracker.display().is_blank());
        assert_eq!(tracker.display().clears, 1);
        // The spot covers the whole board at culmination
        assert_eq!(tracker.display().peak_lit, 64);
    }

    #[test]
    fn test_track_from_standby() {
        let clock = SimulatedClock::new(t0());
        let source = Scripted { responses: VecDeque::new() };
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock.clone(), zero_phases());
        let pass = Pass::new(
            Sample::new(t0() + secs(2), 10.0, 180.0),
            Sample::new(t0() + secs(7), 90.0, 270.0),
            Sample::new(t0() + secs(12), 10.0, 112.5),
        )
        .unwrap();

        tracker.track(pass).unwrap();

        let monitor = tracker.events().phases().find(|&(_, p)| p == Phase::Monitor).map(|(at, _)| at);
        assert!(monitor.is_some_and(|at| at <= t0() + secs(2)));
        let last = tracker.events().phases().last();
        assert!(last.is_some_and(|(at, p)| p == Phase::Search && at <= t0() + secs(12)));
    }

    #[test]
    fn test_search_retries_after_empty_result() {
        let clock = SimulatedClock::new(t0());
        let source = Scripted::new([Ok(Vec::new()), Ok(vec![pass_at(t0() + secs(300))])]);
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock.clone(), zero_phases());

        tracker.run_cycle().unwrap();

        let polls: Vec<_> = tracker
            .events()
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Polled { .. }))
            .map(|e| e.at)
            .collect();
        assert_eq!(polls, [t0(), t0() + secs(60)]);
        let standby = tracker.events().phases().find(|&(_, p)| p == Phase::Standby);
        assert_eq!(standby, Some((t0() + secs(60), Phase::Standby)));
    }

    #[test]
    fn test_search_skips_ended_passes() {
        let clock = SimulatedClock::new(t0());
        let ended = pass_at(t0() - secs(60));
        let upcoming = pass_at(t0() + secs(30));
        let source = Scripted::new([Ok(vec![ended, upcoming])]);
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock.clone(), zero_phases());

        tracker.run_cycle().unwrap();
        assert_eq!(clock.now(), upcoming.end.time);
    }

    #[test]
    fn test_pass_in_progress_goes_straight_to_monitor() {
        let clock = SimulatedClock::new(t0());
        let source = Scripted::new([Ok(vec![pass_at(t0() - secs(3))])]);
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock.clone(), Timing::default());

        tracker.run_cycle().unwrap();
        let monitor = tracker.events().phases().find(|&(_, p)| p == Phase::Monitor);
        assert_eq!(monitor, Some((t0(), Phase::Monitor)));
        assert_eq!(clock.now(), t0() + secs(7));
    }

    #[test]
    fn test_source_error_ends_cycle() {
        let clock = SimulatedClock::new(t0());
        let source = Scripted::new([Err(SourceError::Parse("maintenance".into()))]);
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock, zero_phases());

        let result = tracker.run_cycle();
        assert!(matches!(result, Err(TrackerError::Source(SourceError::Parse(_)))));
        assert_eq!(tracker.phase(), Phase::Search);
    }

    #[test]
    fn test_display_error_ends_cycle() {
        let clock = SimulatedClock::new(t0());
        let source = FixtureSource::new(clock.clone());
        let mut tracker = PassTracker::new(source, Failing { left: 5 }, clock, zero_phases());

        let result = tracker.run_cycle();
        assert!(matches!(result, Err(TrackerError::Display(DisplayError::Closed))));
    }

    #[test]
    fn test_standby_reminders() {
        let clock = SimulatedClock::new(t0());
        let source = FixtureSource::new(clock.clone()).with_lead(TimeDelta::minutes(150));
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock.clone(), Timing::default());

        tracker.run_cycle().unwrap();

        let fired: Vec<_> = tracker.events().reminders().collect();
        assert_eq!(fired, ["2H", "1H", "45M", "30M", "15M", "10M", "5M", "2M"]);

        let start = t0() + TimeDelta::minutes(150);
        let reminder_times: Vec<_> = tracker
            .events()
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Reminder(_)))
            .map(|e| start - e.at)
            .collect();
        assert_eq!(reminder_times[0], TimeDelta::hours(2));
        assert_eq!(reminder_times[7], TimeDelta::minutes(2));

        let countdown = tracker.events().phases().find(|&(_, p)| p == Phase::Countdown);
        assert_eq!(countdown, Some((start - secs(80), Phase::Countdown)));
    }

    #[test]
    fn test_countdown_pie_and_digits() {
        let clock = SimulatedClock::new(t0());
        let source = Scripted::new([Ok(vec![pass_at(t0() + secs(20))])]);
        let timing = Timing::with_phases(secs(10), secs(4));
        let mut tracker = PassTracker::new(source, History::default(), clock.clone(), timing);

        tracker.run_cycle().unwrap();

        let half_red = scale(0.5, RED);
        let wedges: Vec<_> = tracker
            .display()
            .frames
            .iter()
            .filter(|f| f.lit_count() > 2)
            .map(|f| (f.lit_count(), f.pixels().iter().filter(|&&c| c == half_red).count()))
            .filter(|&(_, red)| red > 0)
            .collect();
        // 100 ticks over 10 s. At 300 ms left the only wedge cell, (7, 4), is
        // under the units digit, and from 200 ms no cell reaches its threshold.
        assert_eq!(wedges.len(), 97);
        // Full board with "10" overlaid
        assert_eq!(wedges[0].0, 64);
        assert_eq!(wedges[96].1, 1);
        assert_eq!(tracker.display().clears, 1);
    }

    #[test]
    fn test_stop_request_ends_run_and_blanks_board() {
        let clock = SimulatedClock::new(t0());
        let stop = Arc::new(AtomicBool::new(false));
        let mut sink = StopAfter { frames: 40, stop: Arc::clone(&stop), board: MemoryDisplay::new() };
        {
            let guard = DisplayGuard::new(&mut sink);
            let source = FixtureSource::new(clock.clone());
            let mut tracker = PassTracker::new(source, guard, clock.clone(), zero_phases()).with_stop(stop);

            let result = tracker.run();
            assert!(matches!(result, Err(TrackerError::Interrupted)));
            // 12 standby frames, then stopped while monitoring
            assert_eq!(tracker.phase(), Phase::Monitor);
            assert!(tracker.current_pass().is_some());
        }
        assert!(sink.board.peak_lit > 0);
        assert_eq!(sink.board.clears, 1);
        assert!(sink.board.is_blank());
    }

    #[test]
    fn test_stop_while_searching() {
        let clock = SimulatedClock::new(t0());
        let stop = Arc::new(AtomicBool::new(true));
        let source = Scripted { responses: VecDeque::new() };
        let mut tracker = PassTracker::new(source, MemoryDisplay::new(), clock.clone(), zero_phases()).with_stop(stop);

        assert!(matches!(tracker.run_cycle(), Err(TrackerError::Interrupted)));
        assert_eq!(tracker.phase(), Phase::Search);
        assert_eq!(clock.now(), t0());
    }
}
