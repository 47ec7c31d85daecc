//! Proportional bitmap font built from the `font8x8` glyph tables.
//!
//! Glyphs are addressed by a single byte (character code 0..=255). Codes 0..=127 come from the
//! basic ASCII table and 160..=255 from the Latin-1 supplement. A `char` maps to the code of the
//! same value; characters beyond U+00FF are drawn as [`FALLBACK_CODE`]. Each glyph is shifted so its
//! leftmost lit column sits at x = 0, and its advance is the lit span plus one column of
//! spacing. All glyphs share [`GLYPH_HEIGHT`].

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

/// Height of every glyph cell in pixels, including one blank row above and below the bitmap.
pub const GLYPH_HEIGHT: u32 = 10;

/// Advance of the space character. Space has no lit pixels to measure.
pub const SPACE_WIDTH: u8 = 4;

/// Code used for characters the table has no slot for.
pub const FALLBACK_CODE: u8 = b'?';

/// Rows of the 8x8 source bitmap start at this row of the glyph cell.
const BITMAP_TOP: usize = 1;

/// Immutable per-character metrics and bitmaps.
#[derive(Debug, Clone)]
pub struct FontTable {
    widths: [u8; 256],
    /// One row mask per cell row; bit `x` set means pixel `x` is lit.
    bitmaps: Vec<[u8; GLYPH_HEIGHT as usize]>,
}

impl FontTable {
    /// Builds the table from the embedded `font8x8` data.
    pub fn new() -> Self {
        let mut widths = [0u8; 256];
        let mut bitmaps = vec![[0u8; GLYPH_HEIGHT as usize]; 256];

        for code in 0..=255u8 {
            let ch = code as char;
            if ch == ' ' || ch == '\u{a0}' {
                widths[code as usize] = SPACE_WIDTH;
                continue;
            }

            let source = if code < 128 {
                BASIC_FONTS.get(ch)
            } else {
                LATIN_FONTS.get(ch)
            };
            let Some(rows) = source else { continue };

            let lit = rows.iter().fold(0u8, |acc, row| acc | row);
            if lit == 0 {
                continue;
            }
            let left = lit.trailing_zeros();
            let right = 7 - lit.leading_zeros();

            for (i, row) in rows.iter().enumerate() {
                bitmaps[code as usize][BITMAP_TOP + i] = row >> left;
            }
            widths[code as usize] = (right - left + 2) as u8;
        }

        Self { widths, bitmaps }
    }

    /// Table slot for `ch`.
    pub fn code(ch: char) -> u8 {
        u8::try_from(ch).unwrap_or(FALLBACK_CODE)
    }

    /// Pixel advance of `code`.
    pub fn width(&self, code: u8) -> u32 {
        self.widths[code as usize] as u32
    }

    pub fn char_width(&self, ch: char) -> u32 {
        self.width(Self::code(ch))
    }

    /// Shared glyph height.
    pub fn height(&self) -> u32 {
        GLYPH_HEIGHT
    }

    /// Whether pixel `(x, y)` of glyph `code` is lit. Out-of-cell coordinates are unlit.
    pub fn is_lit(&self, code: u8, x: u32, y: u32) -> bool {
        if x >= 8 || y >= GLYPH_HEIGHT {
            return false;
        }
        (self.bitmaps[code as usize][y as usize] >> x) & 1 == 1
    }
}

impl Default for FontTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_has_fixed_width() {
        let font = FontTable::new();
        assert_eq!(font.width(b' '), SPACE_WIDTH as u32);
    }

    #[test]
    fn test_control_characters_are_blank() {
        let font = FontTable::new();
        assert_eq!(font.width(0), 0);
        assert_eq!(font.width(b'\n'), 0);
        assert!((0..8).all(|x| (0..GLYPH_HEIGHT).all(|y| !font.is_lit(0, x, y))));
    }

    /// Narrow glyphs get narrower advances than wide ones.
    #[test]
    fn test_widths_are_proportional() {
        let font = FontTable::new();
        assert!(font.width(b'i') < font.width(b'M'));
        assert!(font.width(b'M') <= 9);
        assert!(font.width(b'i') >= 2);
    }

    /// Trimmed glyphs start at column 0 and leave the outer rows empty.
    #[test]
    fn test_glyph_is_trimmed_and_padded() {
        let font = FontTable::new();
        for code in [b'A', b'l', b'W', b'0'] {
            assert!((0..GLYPH_HEIGHT).any(|y| font.is_lit(code, 0, y)));
            assert!((0..8).all(|x| !font.is_lit(code, x, 0)));
            assert!((0..8).all(|x| !font.is_lit(code, x, GLYPH_HEIGHT - 1)));
        }
    }

    #[test]
    fn test_latin_supplement_present() {
        let font = FontTable::new();
        assert!(font.width(0xE9) > 0); // é
        assert_eq!(FontTable::code('é'), 0xE9);
        assert_eq!(font.char_width('é'), font.width(0xE9));
    }

    #[test]
    fn test_chars_beyond_latin1_use_fallback() {
        let font = FontTable::new();
        assert_eq!(FontTable::code('日'), FALLBACK_CODE);
        assert_eq!(FontTable::code('\u{100}'), FALLBACK_CODE);
        assert_eq!(font.char_width('€'), font.width(b'?'));
    }
}
