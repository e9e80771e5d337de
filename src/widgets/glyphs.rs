//! Bitmap glyph and text drawing.
//!
//! Glyphs come from the decoded 4x5 [`Font`]. Text is laid out left to right
//! with a one column gap and may start or run off the board: off-board cells
//! are clipped by the draw target, which is how the scrolling reminder
//! notification slides text across.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::font::{Font, GLYPH_ADVANCE, Glyph};

/// Draw one glyph with its top-left corner at `(dx, dy)`.
pub fn draw_glyph<D>(display: &mut D, glyph: &Glyph, dx: i32, dy: i32, color: Rgb888)
where
    D: DrawTarget<Color = Rgb888>,
{
    let cells = glyph.iter().enumerate().flat_map(|(y, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &bit)| bit > 0)
            .map(move |(x, _)| Pixel(Point::new(x as i32 + dx, y as i32 + dy), color))
    });
    display.draw_iter(cells).ok();
}

/// Draw `text` starting at `(dx, dy)`.
///
/// Characters without a glyph are skipped but still advance the cursor, so
/// the rest of the text keeps its position.
pub fn draw_text<D>(display: &mut D, font: &Font, text: &str, dx: i32, dy: i32, color: Rgb888)
where
    D: DrawTarget<Color = Rgb888>,
{
    let mut x = dx;
    for c in text.chars() {
        match font.glyph(c) {
            Ok(glyph) => draw_glyph(display, glyph, x, dy, color),
            Err(e) => log::debug!("skipping character: {e}"),
        }
        x += GLYPH_ADVANCE;
    }
}
