// Crate-level lints: pixel math casts between board indices, coordinates and floats
#![allow(clippy::cast_possible_truncation)] // f64->i32 and usize->i32 for cell coordinates
#![allow(clippy::cast_precision_loss)] // i64/usize->f64 in tween and timing math
#![allow(clippy::cast_possible_wrap)] // usize->i32 wrapping is impossible on an 8x8 board
#![allow(clippy::cast_sign_loss)] // i32->usize where the value is known non-negative
#![allow(clippy::module_name_repetitions)] // PassSource in source, DisplaySink in display

//! ISS pass tracker for an 8x8 RGB LED matrix.
//!
//! Predicted passes of the International Space Station are fetched from a
//! [`PassSource`](source::PassSource) and turned into a sequence of animated
//! phases on the board:
//!
//! - **Search**: blue corner blink while polling for the next pass
//! - **Standby**: green heartbeat, plus scrolling reminders (`1D` ... `2M`)
//! - **Countdown**: shrinking red pie with the seconds left
//! - **Setup**: blue north marker and a blinking marker where the pass starts
//! - **Monitor**: white spot growing towards culmination and a red azimuth
//!   marker
//!
//! # Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`compass`], [`tween`], [`pass`] | Bearings, easing curves, pass model |
//! | [`render`], [`widgets`], [`screens`] | Frame buffer and drawing |
//! | [`font`], [`colors`], [`animations`] | Glyphs, palette, time-driven effects |
//! | [`state`], [`phase`], [`reminders`], [`events`] | Phase machine |
//! | [`source`], [`display`], [`clock`] | Injected collaborators |
//! | [`config`], [`location`], [`error`] | Constants, settings, errors |
//!
//! # Example
//!
//! ```no_run
//! use iss_matrix::clock::SystemClock;
//! use iss_matrix::config::Timing;
//! use iss_matrix::display::{DisplayGuard, Rotation, TerminalDisplay};
//! use iss_matrix::source::FixtureSource;
//! use iss_matrix::state::PassTracker;
//!
//! let sink = DisplayGuard::new(TerminalDisplay::stdout(Rotation::Deg0));
//! let mut tracker = PassTracker::new(FixtureSource::new(SystemClock), sink, SystemClock, Timing::default());
//! tracker.run_cycle()?;
//! # Ok::<(), iss_matrix::error::TrackerError>(())
//! ```

pub mod animations;
pub mod clock;
pub mod colors;
pub mod compass;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod font;
pub mod location;
pub mod pass;
pub mod phase;
pub mod reminders;
pub mod render;
pub mod screens;
pub mod source;
pub mod state;
pub mod tween;
pub mod widgets;
