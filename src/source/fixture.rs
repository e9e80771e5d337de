//! Synthetic pass source.

use chrono::TimeDelta;

use super::PassSource;
use crate::clock::Clock;
use crate::compass::angle_of;
use crate::config::{FIXTURE_LEAD_SECS, FIXTURE_LEG_SECS};
use crate::error::SourceError;
use crate::pass::{Pass, Sample};

/// Yields one pass starting shortly after each call: S -> W -> ESE, rising to
/// the zenith.
pub struct FixtureSource<C: Clock> {
    clock: C,
    lead: TimeDelta,
    leg: TimeDelta,
}

impl<C: Clock> FixtureSource<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            lead: TimeDelta::seconds(FIXTURE_LEAD_SECS),
            leg: TimeDelta::seconds(FIXTURE_LEG_SECS),
        }
    }

    /// Override the lead before the pass start.
    #[must_use]
    pub fn with_lead(mut self, lead: TimeDelta) -> Self {
        self.lead = lead;
        self
    }
}

impl<C: Clock> PassSource for FixtureSource<C> {
    fn name(&self) -> &str {
        "fixture"
    }

    fn list_visible_passes(&mut self) -> Result<Vec<Pass>, SourceError> {
        let start = self.clock.now() + self.lead;
        let high = start + self.leg;
        let end = high + self.leg;

        let pass = Pass::new(
            Sample::new(start, 10.0, angle_of("S")?),
            Sample::new(high, 90.0, angle_of("W")?),
            Sample::new(end, 10.0, angle_of("ESE")?),
        )
        .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(vec![pass])
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::clock::SimulatedClock;

    #[test]
    fn test_fixture_pass_shape() {
        let t = Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap();
        let mut source = FixtureSource::new(SimulatedClock::new(t));
        let passes = source.list_visible_passes().unwrap();

        assert_eq!(passes.len(), 1);
        let pass = passes[0];
        assert_eq!(pass.start.time, t + TimeDelta::seconds(2));
        assert_eq!(pass.high.time, t + TimeDelta::seconds(7));
        assert_eq!(pass.end.time, t + TimeDelta::seconds(12));
        assert_eq!((pass.start.azimuth, pass.high.azimuth, pass.end.azimuth), (180.0, 270.0, 112.5));
        assert_eq!(pass.high.altitude, 90.0);
        assert_eq!(source.name(), "fixture");
    }

    #[test]
    fn test_fixture_follows_the_clock() {
        let t = Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap();
        let clock = SimulatedClock::new(t);
        let mut source = FixtureSource::new(clock.clone()).with_lead(TimeDelta::minutes(3));

        clock.advance(TimeDelta::hours(1));
        let pass = source.list_visible_passes().unwrap()[0];
        assert_eq!(pass.start.time, t + TimeDelta::hours(1) + TimeDelta::minutes(3));
    }
}
