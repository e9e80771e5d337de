//! Drawing widgets for the 8x8 board.
//!
//! - [`primitives`]: geometric primitives (edge marker, pie wedge, spot)
//! - [`glyphs`]: bitmap glyphs and text
//!
//! All widgets draw onto any embedded-graphics `DrawTarget<Color = Rgb888>`;
//! the phase screens in [`screens`](crate::screens) compose them into a
//! [`Frame`](crate::render::Frame).

mod glyphs;
mod primitives;

pub use glyphs::{draw_glyph, draw_text};
pub use primitives::{
    EDGE_CELLS,
    EDGE_STEP,
    EDGE_X,
    EDGE_Y,
    PIE_THRESHOLDS,
    draw_edge,
    draw_pie,
    draw_spot,
    edge_index,
    edge_point,
};
