//! Live pass screen.
//!
//! While the pass is on, the board shows:
//!
//! - a white spot whose size follows [`distinv`] of the leg progress, so it
//!   stays small for most of the pass and flares around culmination
//! - the blue north marker
//! - a red marker at the interpolated satellite azimuth
//!
//! The markers are drawn after the spot so they stay visible when the spot
//! covers the whole board.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::colors::{BLUE, RED, WHITE};
use crate::compass::NORTH;
use crate::pass::TrackPoint;
use crate::tween::distinv;
use crate::widgets::{draw_edge, draw_spot};

/// Draw the satellite position.
pub fn draw_monitor<D>(display: &mut D, point: TrackPoint)
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_spot(display, distinv(point.progress), WHITE);
    draw_edge(display, NORTH, BLUE);
    draw_edge(display, point.azimuth, RED);
}
