//! Observer location and runtime settings loaded from `config.json`.
//!
//! ```json
//! {
//!     "name": "Marcellaz",
//!     "lat": 46.1453,
//!     "lng": 6.355,
//!     "alt": 647,
//!     "satid": 25544,
//!     "rotation": 270,
//!     "countdown_secs": 60,
//!     "setup_secs": 20
//! }
//! ```
//!
//! Everything below `alt` is optional. The file is written by hand.

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use serde::Deserialize;

use crate::config::Timing;
use crate::display::Rotation;
use crate::error::ConfigError;

/// NORAD catalog number of the ISS.
pub const ISS_SATID: u32 = 25544;

/// Where passes are predicted for.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Location {
    /// Display name sent to the provider.
    pub name: String,
    /// Latitude in degrees, north positive.
    pub lat: f64,
    /// Longitude in degrees, east positive.
    pub lng: f64,
    /// Elevation in meters.
    #[serde(default)]
    pub alt: f64,
    /// Satellite to track.
    #[serde(default = "default_satid")]
    pub satid: u32,
}

const fn default_satid() -> u32 {
    ISS_SATID
}

impl Location {
    /// Placeholder location at 0,0 used when no config is available.
    pub fn unspecified() -> Self {
        Self { name: "Unspecified".into(), lat: 0.0, lng: 0.0, alt: 0.0, satid: ISS_SATID }
    }
}

/// Contents of `config.json`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub location: Location,
    /// Board orientation in degrees (0, 90, 180 or 270).
    #[serde(default)]
    pub rotation: Rotation,
    /// Countdown length override.
    #[serde(default)]
    pub countdown_secs: Option<i64>,
    /// Setup length override.
    #[serde(default)]
    pub setup_secs: Option<i64>,
}

impl Config {
    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Config for the unspecified location with default settings.
    pub fn unspecified() -> Self {
        Self {
            location: Location::unspecified(),
            rotation: Rotation::default(),
            countdown_secs: None,
            setup_secs: None,
        }
    }

    /// Phase timing with the overrides applied. Negative lengths count as zero.
    pub fn timing(&self) -> Timing {
        let defaults = Timing::default();
        let phase = |secs: Option<i64>, default| secs.map_or(default, |s| TimeDelta::seconds(s.max(0)));
        Timing::with_phases(phase(self.countdown_secs, defaults.countdown), phase(self.setup_secs, defaults.setup))
    }
}
