//! Linux framebuffer sink.
//!
//! The Sense HAT exposes its 8x8 matrix as a framebuffer device of 64 RGB565
//! pixels, little-endian, row-major. Every frame is written whole from offset
//! zero.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

use super::{DisplaySink, Rotation};
use crate::config::PIXEL_COUNT;
use crate::error::DisplayError;
use crate::render::Frame;

/// Framebuffer device of the Sense HAT LED matrix.
pub const DEFAULT_DEVICE: &str = "/dev/fb1";

/// Bytes per frame (two per RGB565 pixel).
const FRAME_BYTES: usize = 2 * PIXEL_COUNT;

/// RGB565 framebuffer sink.
pub struct FramebufferDisplay<F: Write + Seek = File> {
    device: F,
    rotation: Rotation,
}

impl FramebufferDisplay<File> {
    /// Open a framebuffer device for writing.
    pub fn open(path: impl AsRef<Path>, rotation: Rotation) -> Result<Self, DisplayError> {
        let device = OpenOptions::new().write(true).open(path)?;
        Ok(Self::new(device, rotation))
    }
}

impl<F: Write + Seek> FramebufferDisplay<F> {
    pub const fn new(device: F, rotation: Rotation) -> Self {
        Self { device, rotation }
    }

    /// The underlying device.
    pub fn get_ref(&self) -> &F {
        &self.device
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let bytes = encode(&self.rotation.rotate(frame));
        self.device.seek(SeekFrom::Start(0))?;
        self.device.write_all(&bytes)?;
        self.device.flush()
    }
}

/// Pack a frame into RGB565 little-endian bytes.
pub fn encode(frame: &Frame) -> [u8; FRAME_BYTES] {
    let mut bytes = [0u8; FRAME_BYTES];
    for (chunk, &color) in bytes.chunks_exact_mut(2).zip(frame.pixels()) {
        chunk.copy_from_slice(&to_rgb565(color).into_storage().to_le_bytes());
    }
    bytes
}

#[inline]
fn to_rgb565(color: Rgb888) -> Rgb565 {
    Rgb565::from(color)
}

impl<F: Write + Seek> DisplaySink for FramebufferDisplay<F> {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        Ok(self.write_frame(frame)?)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(self.write_frame(&Frame::new())?)
    }
}
