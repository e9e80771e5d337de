//! Color constants and intensity scaling for the LED matrix.
//!
//! # Using Built-in `RgbColor` Trait Constants
//!
//! The primary colors come straight from the `RgbColor` trait constants provided by
//! `embedded_graphics`, so they are guaranteed full-scale values.
//!
//! ## Rgb888 Color Format
//!
//! The matrix is modelled as 24-bit color (8 bits per channel). Sinks that need
//! RGB565 (the Sense HAT framebuffer) convert at presentation time.
//!
//! # Dimming
//!
//! Every animation dims colors by a progress value through [`scale`], which
//! truncates each channel the same way the LEDs quantize brightness.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). An unlit cell.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white (255, 255, 255). Used for the pass spot and countdown digits.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Pure red (255, 0, 0). Satellite azimuth marker and countdown pie.
pub const RED: Rgb888 = Rgb888::RED;

/// Pure green (0, 255, 0). Standby heartbeat.
pub const GREEN: Rgb888 = Rgb888::GREEN;

/// Pure blue (0, 0, 255). North marker and search blink.
pub const BLUE: Rgb888 = Rgb888::BLUE;

/// Yellow (255, 255, 0). Reminder notifications.
pub const YELLOW: Rgb888 = Rgb888::YELLOW;

// =============================================================================
// Scaling
// =============================================================================

/// Scale every channel of `color` by `intensity`.
///
/// `intensity` is clamped to `[0, 1]` and each channel is truncated, so
/// `scale(0.5, RED)` is `(127, 0, 0)`.
#[inline]
pub fn scale(intensity: f64, color: Rgb888) -> Rgb888 {
    let k = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
    let channel = |c: u8| (k * f64::from(c)) as u8;
    Rgb888::new(channel(color.r()), channel(color.g()), channel(color.b()))
}

/// Whether a cell holding `color` is lit.
#[inline]
pub fn is_lit(color: Rgb888) -> bool {
    color != BLACK
}
