//! The 8x8 pixel buffer.
//!
//! [`Frame`] is the only drawing surface of the tracker. Each tick the phase
//! machine clears it, composes the phase screen into it and hands it to the
//! display sink. There is no dirty tracking: the board is small enough that a
//! full redraw every tick is simpler than diffing.
//!
//! # Addressing
//!
//! Cells are stored row-major, `index = 8 * y + x`, with `(0, 0)` in the top
//! left corner. [`Frame::set`] treats an off-board coordinate as a caller bug
//! and panics; sprite drawing and the embedded-graphics [`DrawTarget`] impl
//! clip silently instead, so glyphs can scroll partially off the board.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::colors::{BLACK, is_lit};
use crate::config::{BOARD_SIZE, PIXEL_COUNT};

/// The LED matrix contents for one tick.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    pixels: [Rgb888; PIXEL_COUNT],
}

impl Frame {
    /// A blank (all black) frame.
    pub const fn new() -> Self {
        Self { pixels: [BLACK; PIXEL_COUNT] }
    }

    /// Set every cell to black.
    #[inline]
    pub fn clear(&mut self) {
        self.pixels = [BLACK; PIXEL_COUNT];
    }

    /// Set a single cell.
    ///
    /// # Panics
    /// If `x` or `y` is not below 8.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb888) {
        assert!(x < BOARD_SIZE && y < BOARD_SIZE, "cell ({x}, {y}) is off the 8x8 board");
        self.pixels[BOARD_SIZE * y + x] = color;
    }

    /// Color of a single cell.
    ///
    /// # Panics
    /// If `x` or `y` is not below 8.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb888 {
        assert!(x < BOARD_SIZE && y < BOARD_SIZE, "cell ({x}, {y}) is off the 8x8 board");
        self.pixels[BOARD_SIZE * y + x]
    }

    /// Set a cell given signed coordinates, ignoring off-board positions.
    #[inline]
    pub fn set_clipped(&mut self, x: i32, y: i32, color: Rgb888) {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
            && x < BOARD_SIZE
            && y < BOARD_SIZE
        {
            self.pixels[BOARD_SIZE * y + x] = color;
        }
    }

    /// Paint every non-zero mask cell, translated by `(dx, dy)`.
    ///
    /// Cells that land off the board are clipped.
    pub fn draw_sprite<const W: usize>(&mut self, mask: &[[u8; W]], dx: i32, dy: i32, color: Rgb888) {
        for (y, row) in mask.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                if bit > 0 {
                    self.set_clipped(x as i32 + dx, y as i32 + dy, color);
                }
            }
        }
    }

    /// All 64 cells, row-major.
    #[inline]
    pub const fn pixels(&self) -> &[Rgb888; PIXEL_COUNT] {
        &self.pixels
    }

    /// Number of lit (non-black) cells.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&c| is_lit(c)).count()
    }

    /// Row-major mask of lit cells.
    pub fn lit_mask(&self) -> [bool; PIXEL_COUNT] {
        self.pixels.map(is_lit)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(BOARD_SIZE as u32, BOARD_SIZE as u32)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_clipped(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels = [color; PIXEL_COUNT];
        Ok(())
    }
}
