//! Terminal preview.
//!
//! Each cell is printed as two full-block characters in 24-bit color, so the
//! board keeps a roughly square aspect. After the first frame the cursor is
//! moved back up eight lines and the board is redrawn in place.

use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, queue};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use super::{DisplaySink, Rotation};
use crate::config::BOARD_SIZE;
use crate::error::DisplayError;
use crate::render::Frame;

const CELL: &str = "\u{2588}\u{2588}";

/// Terminal sink writing to any [`Write`].
pub struct TerminalDisplay<W: Write> {
    out: W,
    rotation: Rotation,
    drawn: bool,
}

impl TerminalDisplay<io::Stdout> {
    /// Terminal sink on standard output.
    pub fn stdout(rotation: Rotation) -> Self {
        Self::new(io::stdout(), rotation)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub const fn new(out: W, rotation: Rotation) -> Self {
        Self { out, rotation, drawn: false }
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let frame = self.rotation.rotate(frame);
        if self.drawn {
            queue!(self.out, cursor::MoveUp(BOARD_SIZE as u16))?;
        }
        for row in frame.pixels().chunks(BOARD_SIZE) {
            for &color in row {
                queue!(self.out, SetForegroundColor(to_color(color)), Print(CELL))?;
            }
            queue!(self.out, ResetColor, Print('\n'))?;
        }
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }
}

#[inline]
fn to_color(color: Rgb888) -> Color {
    Color::Rgb { r: color.r(), g: color.g(), b: color.b() }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        Ok(self.write_frame(frame)?)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(self.write_frame(&Frame::new())?)
    }
}
