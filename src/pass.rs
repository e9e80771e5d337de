//! Predicted satellite pass.
//!
//! A [`Pass`] holds three timestamped altitude/azimuth samples: where the
//! satellite rises into view, where it culminates ("high") and where it
//! disappears. Passes are validated on construction and never mutated.
//!
//! # Track Interpolation
//!
//! While a pass is in progress the board shows where the satellite is now.
//! [`Pass::track`] interpolates the azimuth along the shortest turn of the
//! current leg (start -> high, then high -> end) and returns the leg progress
//! used to size the spot:
//!
//! ```text
//!            start            high             end
//! x:         0 ----------->  1 | 1 <----------- 0
//! azimuth:   start + x*da1     | end - x*da2
//! ```
//!
//! `x` measures closeness to culmination, not elapsed time: it climbs to 1 at
//! `high` and falls back to 0 at `end`.

use core::fmt;

use chrono::{DateTime, Utc};

use crate::compass::{self, name_of};
use crate::config::seconds;
use crate::error::PassError;

/// One timestamped position sample of a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// UTC timestamp of the sample.
    pub time: DateTime<Utc>,
    /// Degrees above the horizon.
    pub altitude: f64,
    /// Compass bearing in degrees, `[0, 360)`.
    pub azimuth: f64,
}

impl Sample {
    pub const fn new(time: DateTime<Utc>, altitude: f64, azimuth: f64) -> Self {
        Self { time, altitude, azimuth }
    }
}

/// A predicted visibility window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pass {
    /// Where the pass becomes visible.
    pub start: Sample,
    /// Highest point of the pass.
    pub high: Sample,
    /// Where the pass ends.
    pub end: Sample,
    /// Visual magnitude, when the provider reports one.
    pub magnitude: Option<f64>,
}

/// Interpolated satellite position at an instant during the pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    /// Interpolated bearing, `[0, 360)`.
    pub azimuth: f64,
    /// Closeness to culmination on the current leg, `[0, 1]`.
    pub progress: f64,
}

impl Pass {
    /// Build a pass, validating ordering and ranges.
    ///
    /// Azimuths are normalized into `[0, 360)`.
    pub fn new(start: Sample, high: Sample, end: Sample) -> Result<Self, PassError> {
        if !(start.time < high.time && high.time < end.time) {
            return Err(PassError::TimesOutOfOrder);
        }

        let mut samples = [start, high, end];
        for sample in &mut samples {
            if !(0.0..=90.0).contains(&sample.altitude) {
                return Err(PassError::Altitude(sample.altitude));
            }
            if !sample.azimuth.is_finite() {
                return Err(PassError::Azimuth(sample.azimuth));
            }
            sample.azimuth = compass::normalize(sample.azimuth);
        }

        let [start, high, end] = samples;
        Ok(Self { start, high, end, magnitude: None })
    }

    /// Attach a visual magnitude.
    #[must_use]
    pub const fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    /// Whether the pass is over at `now`.
    #[inline]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end.time
    }

    /// Whether `now` lies inside the visibility window.
    #[inline]
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.start.time <= now && now < self.end.time
    }

    /// Interpolated position at `now`.
    ///
    /// Times outside the pass are clamped to its endpoints.
    pub fn track(&self, now: DateTime<Utc>) -> TrackPoint {
        let da1 = compass::shortest_turn(self.start.azimuth, self.high.azimuth);
        let da2 = compass::shortest_turn(self.high.azimuth, self.end.azimuth);

        let (azimuth, progress) = if now < self.high.time {
            let x = fraction(now - self.start.time, self.high.time - self.start.time);
            (self.start.azimuth + x * da1, x)
        } else {
            let x = fraction(self.end.time - now, self.end.time - self.high.time);
            (self.end.azimuth - x * da2, x)
        };

        TrackPoint { azimuth: compass::normalize(azimuth), progress }
    }
}

/// `part / whole` clamped to `[0, 1]`.
fn fraction(part: chrono::TimeDelta, whole: chrono::TimeDelta) -> f64 {
    let whole = seconds(whole);
    if whole <= 0.0 {
        return 1.0;
    }
    (seconds(part) / whole).clamp(0.0, 1.0)
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.time.date_naive())?;
        for sample in [self.start, self.high, self.end] {
            write!(
                f,
                " | {}° {} @ {}",
                sample.altitude,
                name_of(sample.azimuth),
                sample.time.format("%H:%M:%S")
            )?;
        }
        if let Some(magnitude) = self.magnitude {
            write!(f, " | mag {magnitude:.1}")?;
        }
        Ok(())
    }
}
