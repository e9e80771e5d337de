//! Error types for the tracker and its collaborators.
//!
//! Lookups and pass construction fail with small, comparable enums. Errors from
//! the pass source and the display sink end the current cycle and are wrapped
//! into [`TrackerError`] for the caller.

use std::io;

use thiserror::Error;

/// A name or character with no entry in a static table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Not one of the sixteen compass point names.
    #[error("unknown compass point `{0}`")]
    CompassPoint(String),

    /// No bitmap in the glyph font for this character.
    #[error("no glyph for character {0:?}")]
    Glyph(char),
}

/// A pass whose samples violate the pass invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PassError {
    /// Start, high and end times are not strictly increasing.
    #[error("pass times are not strictly increasing")]
    TimesOutOfOrder,

    /// Altitude outside `[0, 90]` degrees (or not finite).
    #[error("altitude {0} is outside 0..=90 degrees")]
    Altitude(f64),

    /// Azimuth is NaN or infinite.
    #[error("azimuth {0} is not a finite angle")]
    Azimuth(f64),
}

/// Failure to obtain pass predictions.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed (connection, timeout or non-2xx status).
    #[error("pass request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// Reading the response body failed.
    #[error("reading pass data failed: {0}")]
    Io(#[from] io::Error),

    /// The response did not contain a pass table.
    #[error("unexpected pass page: {0}")]
    Parse(String),

    /// A compass name in the response was not recognised.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Failure to present a frame.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing to the terminal or framebuffer device failed.
    #[error("display write failed: {0}")]
    Io(#[from] io::Error),

    /// The preview window was closed by the user.
    #[error("display window closed")]
    Closed,
}

/// Failure to load the JSON configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid JSON for the expected shape.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// Rotation must be one of 0, 90, 180, 270.
    #[error("unsupported rotation {0} (expected 0, 90, 180 or 270)")]
    Rotation(u16),
}

/// Anything that terminates a tracking cycle.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    /// A stop was requested (Ctrl-C).
    #[error("stopped on request")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        assert_eq!(LookupError::CompassPoint("NX".into()).to_string(), "unknown compass point `NX`");
        assert_eq!(LookupError::Glyph('#').to_string(), "no glyph for character '#'");
    }

    #[test]
    fn test_tracker_error_is_transparent() {
        let err = TrackerError::from(DisplayError::Closed);
        assert_eq!(err.to_string(), "display window closed");

        let err = TrackerError::from(SourceError::Parse("no table".into()));
        assert_eq!(err.to_string(), "unexpected pass page: no table");

        assert_eq!(TrackerError::Interrupted.to_string(), "stopped on request");
    }

    #[test]
    fn test_lookup_converts_into_source_error() {
        let err: SourceError = LookupError::CompassPoint("??".into()).into();
        assert!(matches!(err, SourceError::Lookup(_)));
    }
}
