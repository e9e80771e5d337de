//! Countdown and setup screens leading up to the pass start.
//!
//! # Countdown
//!
//! A half-intensity red pie shrinks from full to empty between the countdown
//! start and the setup start. Under 100 seconds the whole seconds left are
//! overlaid as two white digits:
//!
//! ```text
//! r r r r r r r r
//! W W W r W W W W       tens at column 0, units at column 4
//! W r W r W r r r
//! ...
//! ```
//!
//! # Setup
//!
//! The blue north marker stays on; a half-intensity red marker at the pass
//! start azimuth blinks on and off, so the viewer can face the right way
//! before the satellite appears.

use core::fmt::Write;

use chrono::TimeDelta;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::animations::setup_marker_on;
use crate::colors::{BLUE, RED, WHITE, scale};
use crate::compass::NORTH;
use crate::config::COUNTDOWN_DIGITS_BELOW;
use crate::font::{Font, GLYPH_WIDTH};
use crate::widgets::{draw_edge, draw_glyph, draw_pie};

/// Top row of the countdown digits.
const DIGITS_ROW: i32 = 1;

/// Draw the countdown pie.
///
/// `fill` is the fraction of the countdown still to go, `remaining` the time
/// left until setup starts.
pub fn draw_countdown<D>(display: &mut D, font: &Font, fill: f64, remaining: TimeDelta)
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_pie(display, fill, scale(0.5, RED));

    let secs = remaining.num_seconds();
    if (0..COUNTDOWN_DIGITS_BELOW).contains(&secs) {
        let mut digits: String<2> = String::new();
        write!(digits, "{secs:02}").ok();
        // Glyphs sit edge to edge, no gap column
        for (i, c) in digits.chars().enumerate() {
            if let Ok(glyph) = font.glyph(c) {
                draw_glyph(display, glyph, (i * GLYPH_WIDTH) as i32, DIGITS_ROW, WHITE);
            }
        }
    }
}

/// Draw the setup orientation cue `elapsed` after setup began.
pub fn draw_setup<D>(display: &mut D, start_azimuth: f64, elapsed: TimeDelta)
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_edge(display, NORTH, BLUE);
    if setup_marker_on(elapsed) {
        draw_edge(display, start_azimuth, scale(0.5, RED));
    }
}
