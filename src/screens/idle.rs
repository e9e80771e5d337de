//! Screens shown while no pass is imminent.
//!
//! # Visual Layout
//!
//! ```text
//! SEARCH                 STANDBY               STANDBY + reminder
//! B . . . . . . .        g . . . . . . .       . . . . . . . .
//! . . . . . . . .        . . . . . . . .       . Y Y . Y . . Y      scrolls
//! . . . . . . . .        . . . . . . . .       Y . . . Y . . Y      right to
//! . . . . . . . .        . . . . . . . .       . . Y . Y Y Y Y      left
//! ```
//!
//! - SEARCH blinks the top-left cell blue, one second on, one second off
//! - STANDBY pulses the same cell green (heartbeat)
//! - A reminder replaces the heartbeat with yellow scrolling text

use chrono::TimeDelta;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::animations::{heartbeat, search_blink_on};
use crate::colors::{BLUE, GREEN, YELLOW, scale};
use crate::font::Font;
use crate::widgets::draw_text;

/// Cell used by the search blink and the heartbeat.
pub const STATUS_CELL: Point = Point::new(0, 0);

/// Row of the top of the reminder text (centers the 5-row glyphs).
const NOTICE_ROW: i32 = 1;

/// Draw the search screen `elapsed` after the search began.
pub fn draw_search<D>(display: &mut D, elapsed: TimeDelta)
where
    D: DrawTarget<Color = Rgb888>,
{
    if search_blink_on(elapsed) {
        Pixel(STATUS_CELL, BLUE).draw(display).ok();
    }
}

/// Draw the standby screen.
///
/// `notice` is the reminder text and its current left edge, if a reminder is
/// scrolling; it suspends the heartbeat.
pub fn draw_standby<D>(display: &mut D, font: &Font, elapsed: TimeDelta, notice: Option<(&str, i32)>)
where
    D: DrawTarget<Color = Rgb888>,
{
    match notice {
        Some((text, x)) => draw_text(display, font, text, x, NOTICE_ROW, YELLOW),
        None => {
            let level = heartbeat(elapsed);
            if level > 0.0 {
                Pixel(STATUS_CELL, scale(level, GREEN)).draw(display).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, is_lit};
    use crate::render::Frame;

    #[test]
    fn test_search_blinks_corner() {
        let mut frame = Frame::new();
        draw_search(&mut frame, TimeDelta::milliseconds(200));
        assert_eq!(frame.get(0, 0), BLUE);
        assert_eq!(frame.lit_count(), 1);

        frame.clear();
        draw_search(&mut frame, TimeDelta::milliseconds(1200));
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn test_standby_heartbeat() {
        let font = Font::decode();
        let mut frame = Frame::new();
        draw_standby(&mut frame, &font, TimeDelta::milliseconds(500), None);
        assert_eq!(frame.get(0, 0), GREEN);

        frame.clear();
        draw_standby(&mut frame, &font, TimeDelta::milliseconds(2500), None);
        assert_eq!(frame.get(0, 0), BLACK);
    }

    #[test]
    fn test_notice_suspends_heartbeat() {
        let font = Font::decode();
        let mut frame = Frame::new();
        draw_standby(&mut frame, &font, TimeDelta::milliseconds(500), Some(("1H", 0)));
        assert!(!is_lit(frame.get(0, 0)), "heartbeat cell stays dark");
        assert!(frame.lit_count() > 0);
        assert!(frame.pixels().iter().filter(|&&c| is_lit(c)).all(|&c| c == YELLOW));
    }
}
