//! Pass prediction providers.
//!
//! - [`HeavensAbove`]: live predictions scraped from heavens-above.com
//! - [`FixtureSource`]: one synthetic pass a few seconds out, for demos and
//!   for exercising the whole phase cycle without network access
//!
//! The phase machine only sees the [`PassSource`] trait and never inspects
//! which provider it was given.

mod fixture;
mod heavens_above;

pub use fixture::FixtureSource;
pub use heavens_above::{HeavensAbove, PASS_SUMMARY_URL, parse_pass_summary};

use crate::error::SourceError;
use crate::pass::Pass;

/// Something that predicts upcoming passes.
pub trait PassSource {
    /// Short provider name for log lines.
    fn name(&self) -> &str;

    /// Upcoming passes ordered by start time. An empty list is a valid answer.
    fn list_visible_passes(&mut self) -> Result<Vec<Pass>, SourceError>;
}

impl<S: PassSource + ?Sized> PassSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn list_visible_passes(&mut self) -> Result<Vec<Pass>, SourceError> {
        (**self).list_visible_passes()
    }
}
