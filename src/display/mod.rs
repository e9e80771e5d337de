//! Display sinks for rendered frames.
//!
//! A [`DisplaySink`] receives a finished [`Frame`] every tick. Sinks own the
//! board orientation: the phase machine always draws with north on the right
//! edge (ring index 0), and each sink applies its [`Rotation`] on the way out.
//!
//! - [`TerminalDisplay`]: ANSI 24-bit color blocks redrawn in place
//! - [`FramebufferDisplay`]: RGB565 Linux framebuffer (Sense HAT style)
//! - [`WindowDisplay`]: embedded-graphics simulator window (`simulator` feature)
//! - [`MemoryDisplay`]: keeps presented frames in memory
//!
//! [`DisplayGuard`] wraps any sink and blanks it when dropped, so the board
//! never keeps showing a stale frame after the tracker stops, whether it
//! returned normally or with an error.

mod framebuffer;
mod terminal;
#[cfg(feature = "simulator")]
mod window;

use std::ops::{Deref, DerefMut};

use serde::Deserialize;

pub use framebuffer::{DEFAULT_DEVICE, FramebufferDisplay};
pub use terminal::TerminalDisplay;
#[cfg(feature = "simulator")]
pub use window::WindowDisplay;

use crate::config::BOARD_SIZE;
use crate::error::{ConfigError, DisplayError};
use crate::render::Frame;

/// Something that shows frames.
pub trait DisplaySink {
    /// Show `frame`.
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Turn every cell off.
    fn clear(&mut self) -> Result<(), DisplayError>;
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        (**self).present(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }
}

impl<D: DisplaySink + ?Sized> DisplaySink for Box<D> {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        (**self).present(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Clockwise rotation applied to frames before they are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    /// Brings ring index 0 (north) to the top center.
    Deg270,
}

impl Rotation {
    /// Destination cell of `(x, y)` after rotating the board.
    #[inline]
    pub const fn apply(self, x: usize, y: usize) -> (usize, usize) {
        let last = BOARD_SIZE - 1;
        match self {
            Self::Deg0 => (x, y),
            Self::Deg90 => (last - y, x),
            Self::Deg180 => (last - x, last - y),
            Self::Deg270 => (y, last - x),
        }
    }

    /// Rotated copy of `frame`.
    pub fn rotate(self, frame: &Frame) -> Frame {
        if self == Self::Deg0 {
            return frame.clone();
        }
        let mut rotated = Frame::new();
        for (i, &color) in frame.pixels().iter().enumerate() {
            let (x, y) = self.apply(i % BOARD_SIZE, i / BOARD_SIZE);
            rotated.set(x, y, color);
        }
        rotated
    }

    /// Rotation in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(ConfigError::Rotation(other)),
        }
    }
}

// =============================================================================
// Clear-on-drop Guard
// =============================================================================

/// Owns a sink and clears it when dropped.
pub struct DisplayGuard<D: DisplaySink> {
    inner: D,
}

impl<D: DisplaySink> DisplayGuard<D> {
    pub const fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: DisplaySink> Deref for DisplayGuard<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.inner
    }
}

impl<D: DisplaySink> DerefMut for DisplayGuard<D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut self.inner
    }
}

impl<D: DisplaySink> DisplaySink for DisplayGuard<D> {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.inner.present(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.inner.clear()
    }
}

impl<D: DisplaySink> Drop for DisplayGuard<D> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.clear() {
            log::warn!("failed to blank display on exit: {e}");
        }
    }
}

// =============================================================================
// In-memory Sink
// =============================================================================

/// Sink that records what it is shown.
#[derive(Clone, Debug, Default)]
pub struct MemoryDisplay {
    /// Most recent frame, `None` after a clear.
    pub last: Option<Frame>,
    /// Number of frames presented.
    pub presented: usize,
    /// Number of clears.
    pub clears: usize,
    /// Highest lit cell count seen in any presented frame.
    pub peak_lit: usize,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the board currently shows anything.
    pub fn is_blank(&self) -> bool {
        self.last.as_ref().is_none_or(|f| f.lit_count() == 0)
    }
}

impl DisplaySink for MemoryDisplay {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.presented += 1;
        self.peak_lit = self.peak_lit.max(frame.lit_count());
        self.last = Some(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        self.last = None;
        Ok(())
    }
}
