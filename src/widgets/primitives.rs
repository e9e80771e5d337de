//! Geometric drawing primitives for the 8x8 board.
//!
//! Every function here is generic over an embedded-graphics [`DrawTarget`] so
//! they work on a [`Frame`](crate::render::Frame) as well as on any other
//! target (the simulator window, a test buffer). Draw errors are ignored with
//! `.ok()`, the board targets are infallible.
//!
//! # Edge Marker
//!
//! The 28 perimeter cells form a ring indexed clockwise from the middle of the
//! right-hand column. A bearing is mapped onto the ring in 360/28 degree steps:
//!
//! ```text
//!    17 18 19 20 21 22 23 24
//!    16                   25
//!    15                   26
//!    14                   27
//!    13                    0
//!    12                    1
//!    11                    2
//!    10  9  8  7  6  5  4  3
//! ```
//!
//! A sink rotation of 270 degrees puts index 0 (north) at the top of the
//! mounted board.
//!
//! # Pie Wedge
//!
//! [`draw_pie`] compares a progress value against a fixed per-cell threshold.
//! The thresholds are the normalized angle of each cell center around the board
//! center, so the lit area sweeps round like a clock hand as progress grows.
//!
//! # Spot
//!
//! [`draw_spot`] paints a disk centered on the board with a soft edge. For an
//! intensity `x`:
//!
//! ```text
//! r  = 3.5 * sqrt(2) * x          // full board diagonal at x = 1
//! d <= r^2                        full color
//! r^2 < d < 1.4 r^2               color * (1.4 r^2 - d) / (0.4 r^2)
//! ```
//!
//! where `d` is the squared distance from the cell to `(3.5, 3.5)`.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::colors::scale;
use crate::compass;
use crate::config::{BOARD_CENTER, BOARD_SIZE, PIXEL_COUNT};

/// Number of perimeter cells.
pub const EDGE_CELLS: usize = 28;

/// Angular width of one perimeter cell.
pub const EDGE_STEP: f64 = 360.0 / EDGE_CELLS as f64;

/// Perimeter column per ring index.
pub const EDGE_X: [i32; EDGE_CELLS] = [
    7, 7, 7, 7, 6, 5, 4, 3, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 7, 7, 7,
];

/// Perimeter row per ring index.
pub const EDGE_Y: [i32; EDGE_CELLS] = [
    4, 5, 6, 7, 7, 7, 7, 7, 7, 7, 7, 6, 5, 4, 3, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3,
];

/// Outer radius of the spot relative to the inner radius, squared.
const SPOT_FALLOFF: f64 = 1.4;

/// Per-cell pie thresholds, row-major.
#[rustfmt::skip]
pub const PIE_THRESHOLDS: [f64; PIXEL_COUNT] = [
    0.625, 0.651, 0.686, 0.727, 0.773, 0.814, 0.849, 0.875,
    0.599, 0.625, 0.664, 0.719, 0.781, 0.836, 0.875, 0.901,
    0.564, 0.586, 0.625, 0.699, 0.801, 0.875, 0.914, 0.936,
    0.523, 0.531, 0.551, 0.625, 0.875, 0.949, 0.969, 0.977,
    0.477, 0.469, 0.449, 0.375, 0.125, 0.051, 0.031, 0.023,
    0.436, 0.414, 0.375, 0.301, 0.199, 0.125, 0.086, 0.064,
    0.401, 0.375, 0.336, 0.281, 0.219, 0.164, 0.125, 0.099,
    0.375, 0.349, 0.314, 0.273, 0.227, 0.186, 0.151, 0.125,
];

/// Ring index for a bearing.
///
/// The bearing is normalized first and the index clamped, so any finite
/// input lands on the board.
#[inline]
pub fn edge_index(azimuth: f64) -> usize {
    let index = (compass::normalize(azimuth) / EDGE_STEP).floor();
    (index.max(0.0) as usize).min(EDGE_CELLS - 1)
}

/// Board cell for a bearing.
#[inline]
pub fn edge_point(azimuth: f64) -> Point {
    let index = edge_index(azimuth);
    Point::new(EDGE_X[index], EDGE_Y[index])
}

/// Light the perimeter cell pointing at `azimuth`.
pub fn draw_edge<D>(display: &mut D, azimuth: f64, color: Rgb888)
where
    D: DrawTarget<Color = Rgb888>,
{
    Pixel(edge_point(azimuth), color).draw(display).ok();
}

/// Paint every cell whose threshold is at most `progress`.
///
/// `progress <= 0` paints nothing, `progress >= 1` paints the whole board.
pub fn draw_pie<D>(display: &mut D, progress: f64, color: Rgb888)
where
    D: DrawTarget<Color = Rgb888>,
{
    let cells = PIE_THRESHOLDS
        .iter()
        .enumerate()
        .filter(|&(_, &threshold)| threshold <= progress)
        .map(|(i, _)| Pixel(cell_point(i), color));
    display.draw_iter(cells).ok();
}

/// Paint a soft-edged disk of the given intensity around the board center.
pub fn draw_spot<D>(display: &mut D, intensity: f64, color: Rgb888)
where
    D: DrawTarget<Color = Rgb888>,
{
    let r = BOARD_CENTER * core::f64::consts::SQRT_2 * intensity.clamp(0.0, 1.0);
    let inner = r * r;
    let outer = SPOT_FALLOFF * inner;

    let cells = (0..PIXEL_COUNT).filter_map(|i| {
        let point = cell_point(i);
        let d = squared_distance(point);
        if d <= inner {
            Some(Pixel(point, color))
        } else if d < outer {
            Some(Pixel(point, scale((outer - d) / (outer - inner), color)))
        } else {
            None
        }
    });
    display.draw_iter(cells).ok();
}

/// Row-major index to board coordinates.
#[inline]
fn cell_point(index: usize) -> Point {
    Point::new((index % BOARD_SIZE) as i32, (index / BOARD_SIZE) as i32)
}

/// Squared distance from a cell to the board center.
#[inline]
fn squared_distance(point: Point) -> f64 {
    let dx = f64::from(point.x) - BOARD_CENTER;
    let dy = f64::from(point.y) - BOARD_CENTER;
    dx.mul_add(dx, dy * dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE, is_lit};
    use crate::render::Frame;

    #[test]
    fn test_edge_tables_trace_the_perimeter() {
        for i in 0..EDGE_CELLS {
            let (x, y) = (EDGE_X[i], EDGE_Y[i]);
            assert!(x == 0 || x == 7 || y == 0 || y == 7, "index {i} is not on the edge");
            // Consecutive cells are neighbours, including the wrap from 27 to 0
            let j = (i + 1) % EDGE_CELLS;
            let step = (EDGE_X[j] - x).abs() + (EDGE_Y[j] - y).abs();
            assert_eq!(step, 1, "gap between {i} and {j}");
        }
    }

    #[test]
    fn test_edge_index_bounds() {
        assert_eq!(edge_index(0.0), 0);
        assert_eq!(edge_index(EDGE_STEP - 1e-9), 0);
        assert_eq!(edge_index(EDGE_STEP), 1);
        assert_eq!(edge_index(359.999), 27);
        assert_eq!(edge_index(360.0), 0);
        assert_eq!(edge_index(-1.0), 27);
        assert_eq!(edge_index(725.0), 0);
    }

    #[test]
    fn test_draw_edge_sets_one_cell() {
        let mut frame = Frame::new();
        draw_edge(&mut frame, 0.0, RED);
        assert_eq!(frame.lit_count(), 1);
        assert_eq!(frame.get(7, 4), RED);

        frame.clear();
        draw_edge(&mut frame, 180.0, RED);
        // 180 / (360 / 28) = 14
        assert_eq!(frame.get(0, 3), RED);
    }

    #[test]
    fn test_pie_empty_and_full() {
        let mut frame = Frame::new();
        draw_pie(&mut frame, 0.0, RED);
        assert_eq!(frame.lit_count(), 0);

        draw_pie(&mut frame, 1.0, RED);
        assert_eq!(frame.lit_count(), PIXEL_COUNT);
    }

    #[test]
    fn test_pie_is_monotone() {
        let mut previous = [false; PIXEL_COUNT];
        for step in 0..=200 {
            let mut frame = Frame::new();
            draw_pie(&mut frame, f64::from(step) / 200.0, RED);
            let lit = frame.lit_mask();
            for i in 0..PIXEL_COUNT {
                assert!(!previous[i] || lit[i], "cell {i} went dark at step {step}");
            }
            previous = lit;
        }
    }

    #[test]
    fn test_spot_zero_paints_nothing() {
        let mut frame = Frame::new();
        draw_spot(&mut frame, 0.0, WHITE);
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn test_spot_full_covers_center() {
        let mut frame = Frame::new();
        draw_spot(&mut frame, 1.0, WHITE);
        // r^2 = 24.5 reaches every cell, the corners sit right on the radius
        assert_eq!(frame.lit_count(), PIXEL_COUNT);
        assert!(is_lit(frame.get(0, 0)));
        assert_eq!(frame.get(3, 4), WHITE);
    }

    #[test]
    fn test_spot_soft_edge() {
        let mut frame = Frame::new();
        // r^2 = 0.98: the four center cells (d = 0.5) are full, the next ring
        // (d = 2.5) is outside 1.4 r^2 = 1.372
        draw_spot(&mut frame, 0.2, WHITE);
        assert_eq!(frame.lit_count(), 4);
        assert_eq!(frame.get(3, 3), WHITE);

        frame.clear();
        // r^2 = 2.205, outer = 3.087: ring at d = 2.5 is dimmed
        draw_spot(&mut frame, 0.3, WHITE);
        let dimmed = frame.get(4, 2);
        assert!(is_lit(dimmed));
        assert!(dimmed.r() < 255);
    }

    #[test]
    fn test_spot_is_monotone() {
        let mut previous = [false; PIXEL_COUNT];
        for step in 0..=100 {
            let mut frame = Frame::new();
            draw_spot(&mut frame, f64::from(step) / 100.0, WHITE);
            let lit = frame.lit_mask();
            for i in 0..PIXEL_COUNT {
                assert!(!previous[i] || lit[i], "cell {i} went dark at step {step}");
            }
            previous = lit;
        }
    }
}
