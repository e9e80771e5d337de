//! 4x5 bitmap font for reminders and countdown digits.
//!
//! # Encoding
//!
//! Every glyph is packed into one 20-bit word: five rows of four bits, top row
//! in the most significant nibble, leftmost column in the most significant bit
//! of each nibble.
//!
//! ```text
//! 'A' = 0x69F99
//!   6  .##.
//!   9  #..#
//!   F  ####
//!   9  #..#
//!   9  #..#
//! ```
//!
//! The table is decoded once into a [`Font`] (a fixed-capacity map from
//! character to bitmap) and only read afterwards.

use heapless::LinearMap;

use crate::error::LookupError;

/// Glyph width in cells.
pub const GLYPH_WIDTH: usize = 4;

/// Glyph height in cells.
pub const GLYPH_HEIGHT: usize = 5;

/// Horizontal advance between consecutive glyphs (one blank column).
pub const GLYPH_ADVANCE: i32 = GLYPH_WIDTH as i32 + 1;

/// Decoded glyph bitmap, row-major, 1 = lit.
pub type Glyph = [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT];

/// Number of glyphs in the encoded table (A-Z, space, 0-9).
const GLYPH_COUNT: usize = 37;

/// Encoded glyph table.
const ENCODED: [(char, u32); GLYPH_COUNT] = [
    (' ', 0x00000),
    ('0', 0x69996),
    ('1', 0x26227),
    ('2', 0xE168F),
    ('3', 0xE161E),
    ('4', 0x99F11),
    ('5', 0xF8E1E),
    ('6', 0x68E96),
    ('7', 0xF1244),
    ('8', 0x69696),
    ('9', 0x69716),
    ('A', 0x69F99),
    ('B', 0xE9E9E),
    ('C', 0x78887),
    ('D', 0xE999E),
    ('E', 0xF8E8F),
    ('F', 0xF8E88),
    ('G', 0x78B97),
    ('H', 0x99F99),
    ('I', 0x72227),
    ('J', 0x11196),
    ('K', 0x9ACA9),
    ('L', 0x8888F),
    ('M', 0x9FF99),
    ('N', 0x9DB99),
    ('O', 0x69996),
    ('P', 0xE9E88),
    ('Q', 0x699B7),
    ('R', 0xE9EA9),
    ('S', 0x7861E),
    ('T', 0xF2222),
    ('U', 0x99996),
    ('V', 0x99966),
    ('W', 0x99FF9),
    ('X', 0x99699),
    ('Y', 0x99716),
    ('Z', 0xF168F),
];

/// Decoded glyph table.
pub struct Font {
    glyphs: LinearMap<char, Glyph, GLYPH_COUNT>,
}

impl Font {
    /// Decode the embedded glyph table.
    pub fn decode() -> Self {
        let mut glyphs = LinearMap::new();
        for (c, bits) in ENCODED {
            // Capacity equals the table length
            glyphs.insert(c, decode_glyph(bits)).ok();
        }
        Self { glyphs }
    }

    /// Bitmap for `c`. Lowercase letters share the uppercase glyphs.
    pub fn glyph(&self, c: char) -> Result<&Glyph, LookupError> {
        self.glyphs.get(&c.to_ascii_uppercase()).ok_or(LookupError::Glyph(c))
    }

    /// Number of decoded glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::decode()
    }
}

/// Unpack one 20-bit glyph word.
const fn decode_glyph(bits: u32) -> Glyph {
    let mut glyph = [[0u8; GLYPH_WIDTH]; GLYPH_HEIGHT];
    let mut row = 0;
    while row < GLYPH_HEIGHT {
        let nibble = (bits >> (4 * (GLYPH_HEIGHT - 1 - row))) & 0xF;
        let mut col = 0;
        while col < GLYPH_WIDTH {
            glyph[row][col] = ((nibble >> (GLYPH_WIDTH - 1 - col)) & 1) as u8;
            col += 1;
        }
        row += 1;
    }
    glyph
}

/// Width in cells of `text` laid out with [`GLYPH_ADVANCE`].
pub fn text_width(text: &str) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * GLYPH_ADVANCE - 1 }
}
