//! Word-wrapping layout and outlined bitmap text rendering.
//!
//! Every character is looked up in the [`FontTable`] through [`FontTable::code`]. Layout produces
//! [`LineCut`]s, half-open byte ranges into the source text that always fall on character
//! boundaries. Drawing plots each
//! lit glyph pixel as a single opaque point on the [`Canvas`], so the output is free of
//! anti-aliasing.

use super::canvas::{Canvas, Color, Rect};
use super::font::{FontTable, GLYPH_HEIGHT};

/// Horizontal placement of each line inside the destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of the whole block of lines inside the destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// One laid-out line: the byte range `[start, end)` of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCut {
    pub start: usize,
    pub end: usize,
}

/// Lazily scans `text` and yields its line cuts for a maximum pixel width.
///
/// A newline ends the current line and is skipped. When the accumulated width exceeds the
/// maximum, the line ends at the last space seen on it (the space is skipped and scanning
/// resumes right after it); without such a space the line ends before the current character,
/// which then starts the next line. A character that is too wide even on its own forms a line
/// by itself. The final cut always ends at `text.len()`, so there is at least one cut.
pub struct LineCuts<'a> {
    font: &'a FontTable,
    text: &'a str,
    max_width: u32,
    start: usize,
    cur: usize,
    finished: bool,
}

impl<'a> LineCuts<'a> {
    pub fn new(font: &'a FontTable, text: &'a str, max_width: u32) -> Self {
        Self {
            font,
            text,
            max_width,
            start: 0,
            cur: 0,
            finished: false,
        }
    }
}

impl Iterator for LineCuts<'_> {
    type Item = LineCut;

    fn next(&mut self) -> Option<LineCut> {
        if self.finished {
            return None;
        }

        let mut width = 0u32;
        let mut last_space = None;

        while let Some(ch) = self.text.get(self.cur..).and_then(|rest| rest.chars().next()) {
            if ch == '\n' {
                let cut = LineCut {
                    start: self.start,
                    end: self.cur,
                };
                self.start = self.cur + 1;
                self.cur = self.start;
                return Some(cut);
            }
            if ch == ' ' {
                last_space = Some(self.cur);
            }

            width = width.saturating_add(self.font.char_width(ch));
            if width > self.max_width {
                let cut = match last_space {
                    Some(space) => {
                        let cut = LineCut {
                            start: self.start,
                            end: space,
                        };
                        self.start = space + 1;
                        cut
                    }
                    // Must consume at least one character per line.
                    None if self.cur == self.start => {
                        let cut = LineCut {
                            start: self.start,
                            end: self.cur + ch.len_utf8(),
                        };
                        self.start = cut.end;
                        cut
                    }
                    None => {
                        let cut = LineCut {
                            start: self.start,
                            end: self.cur,
                        };
                        self.start = self.cur;
                        cut
                    }
                };
                self.cur = self.start;
                return Some(cut);
            }
            self.cur += ch.len_utf8();
        }

        self.finished = true;
        Some(LineCut {
            start: self.start,
            end: self.text.len(),
        })
    }
}

impl FontTable {
    /// Breaks `text` into lines no wider than `max_width` where possible.
    pub fn wrap(&self, text: &str, max_width: u32) -> Vec<LineCut> {
        LineCuts::new(self, text, max_width).collect()
    }

    /// Number of lines [`FontTable::wrap`] would produce, without allocating.
    pub fn line_count(&self, text: &str, max_width: u32) -> usize {
        LineCuts::new(self, text, max_width).count()
    }

    /// Summed advance of the characters in `text[start..end]`. A range that is out of bounds or
    /// splits a character measures as zero.
    pub fn measure_width(&self, text: &str, start: usize, end: usize) -> u32 {
        text.get(start..end)
            .unwrap_or_default()
            .chars()
            .map(|ch| self.char_width(ch))
            .sum()
    }

    /// Width of the widest line when `text` is only broken at newlines.
    pub fn rendered_width(&self, text: &str) -> u32 {
        LineCuts::new(self, text, u32::MAX)
            .map(|cut| self.measure_width(text, cut.start, cut.end))
            .max()
            .unwrap_or(0)
    }

    /// Height of `text` when only broken at newlines.
    pub fn block_height(&self, text: &str) -> u32 {
        self.line_count(text, u32::MAX) as u32 * self.height()
    }

    /// Draws `text` wrapped to `dest.w` in a single color.
    ///
    /// At most `dest.h / GLYPH_HEIGHT` lines are drawn; the rest are dropped. Pixels are clipped
    /// to the canvas, not to `dest`. The canvas draw color is left unchanged.
    pub fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        color: Color,
        dest: Rect,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) {
        let cuts = self.wrap(text, dest.w);
        let line_height = GLYPH_HEIGHT as i32;
        let lines = cuts.len().min((dest.h / GLYPH_HEIGHT) as usize) as i32;

        let mut pen = canvas.with_draw_color(color);
        for (i, cut) in cuts.iter().take(lines as usize).enumerate() {
            let i = i as i32;
            let line_width = self.measure_width(text, cut.start, cut.end) as i32;

            let mut x = match h_align {
                HorizontalAlignment::Left => dest.x,
                HorizontalAlignment::Center => dest.x + (dest.w as i32 - line_width) / 2,
                HorizontalAlignment::Right => dest.x + dest.w as i32 - line_width,
            };
            let y = match v_align {
                VerticalAlignment::Top => dest.y + i * line_height,
                VerticalAlignment::Middle => {
                    dest.y + (dest.h as i32 - lines * line_height) / 2 + i * line_height
                }
                VerticalAlignment::Bottom => dest.y + dest.h as i32 - (lines - i) * line_height,
            };

            for ch in text.get(cut.start..cut.end).unwrap_or_default().chars() {
                let code = FontTable::code(ch);
                self.draw_glyph(&mut pen, code, x, y);
                x += self.width(code) as i32;
            }
        }
    }

    /// Draws `text` in `fill` surrounded by a one pixel halo of `outline`.
    ///
    /// The halo is eight passes of the outline color at every offset in `0..=2` except `(1, 1)`,
    /// laid out in `dest` shrunk by two pixels; the fill pass then lands on `(1, 1)`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_outlined(
        &self,
        canvas: &mut Canvas,
        text: &str,
        fill: Color,
        outline: Color,
        dest: Rect,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) {
        let inner = dest.shrink(2, 2);
        for dy in 0..=2 {
            for dx in 0..=2 {
                if (dx, dy) != (1, 1) {
                    let pass = inner.offset(dx, dy);
                    self.draw_text(canvas, text, outline, pass, h_align, v_align);
                }
            }
        }
        self.draw_text(canvas, text, fill, inner.offset(1, 1), h_align, v_align);
    }

    fn draw_glyph(&self, canvas: &mut Canvas, code: u8, x: i32, y: i32) {
        let width = self.width(code);
        for gy in 0..GLYPH_HEIGHT {
            for gx in 0..width {
                if self.is_lit(code, gx, gy) {
                    canvas.draw_point(x + gx as i32, y + gy as i32);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut(start: usize, end: usize) -> LineCut {
        LineCut { start, end }
    }

    fn lit_pixels(canvas: &Canvas, color: Color) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y) == Some(color) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_wrap_breaks_at_last_space() {
        let font = FontTable::new();
        let text = "abc def ghi";
        let width = font.measure_width(text, 0, 7);

        assert_eq!(font.wrap(text, width), vec![cut(0, 7), cut(8, 11)]);
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let font = FontTable::new();
        let text = "abc def ghi";
        let width = font.measure_width(text, 0, text.len());

        assert_eq!(font.wrap(text, width), vec![cut(0, 11)]);
    }

    /// A word longer than the line is hard-broken and every piece advances.
    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let font = FontTable::new();
        let text = "supercalifragilistic";
        let width = font.measure_width(text, 0, 5);
        let cuts = font.wrap(text, width);

        assert!(cuts.len() > 1);
        assert_eq!(cuts[0], cut(0, 5));
        assert!(cuts.iter().all(|c| c.start < c.end));
        for pair in cuts.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(cuts.last().map(|c| c.end), Some(text.len()));
        for c in &cuts {
            assert!(font.measure_width(text, c.start, c.end) <= width);
        }
    }

    #[test]
    fn test_wrap_empty_string_has_one_empty_cut() {
        let font = FontTable::new();
        assert_eq!(font.wrap("", 100), vec![cut(0, 0)]);
    }

    #[test]
    fn test_wrap_splits_on_newline() {
        let font = FontTable::new();
        assert_eq!(
            font.wrap("ab\n\ncd\n", 1000),
            vec![cut(0, 2), cut(3, 3), cut(4, 6), cut(7, 7)]
        );
    }

    /// The first character alone is wider than the line.
    #[test]
    fn test_wrap_consumes_overwide_first_character() {
        let font = FontTable::new();
        assert_eq!(font.wrap("W", 1), vec![cut(0, 1), cut(1, 1)]);
        assert_eq!(font.wrap("WW", 1), vec![cut(0, 1), cut(1, 2), cut(2, 2)]);
    }

    #[test]
    fn test_wrap_zero_width_terminates() {
        let font = FontTable::new();
        let text = "a b  c\nd";
        let cuts = font.wrap(text, 0);
        assert!(!cuts.is_empty());
        assert_eq!(cuts.last().map(|c| c.end), Some(text.len()));
    }

    #[test]
    fn test_line_count_matches_wrap() {
        let font = FontTable::new();
        let samples = [
            "",
            "hello",
            "Press Space to play\nF11 to toggle fullscreen\nor Escape to exit",
            "supercalifragilistic expialidocious",
            "  leading and trailing  ",
        ];
        for text in samples {
            for width in [0, 1, 7, 20, 64, 200, u32::MAX] {
                assert_eq!(
                    font.line_count(text, width),
                    font.wrap(text, width).len(),
                    "{text:?} at {width}"
                );
            }
        }
    }

    /// Cuts cover the text in order, skip only the break character, and stay within the width
    /// unless a single character is wider on its own.
    #[test]
    fn test_wrap_cuts_cover_text_within_width() {
        let font = FontTable::new();
        let samples = [
            "Press Space to play\nF11 to toggle fullscreen\nor Escape to exit",
            "supercalifragilistic expialidocious",
            "  leading and trailing  ",
            "You crashed into a bamboo shoot\n\nYour score was 12",
            "héllo wörld, ünïcode 日本 text",
        ];
        for text in samples {
            for width in [0, 1, 7, 20, 64, 200, u32::MAX] {
                let cuts = font.wrap(text, width);
                assert_eq!(cuts.first().map(|c| c.start), Some(0));
                assert_eq!(cuts.last().map(|c| c.end), Some(text.len()));

                for pair in cuts.windows(2) {
                    let gap = &text[pair[0].end..pair[1].start];
                    assert!(
                        gap.is_empty() || gap == " " || gap == "\n",
                        "{text:?} at {width}: skipped {gap:?}"
                    );
                }
                for c in &cuts {
                    let line = &text[c.start..c.end];
                    assert!(
                        font.measure_width(text, c.start, c.end) <= width
                            || line.chars().count() == 1,
                        "{text:?} at {width}: {line:?} too wide"
                    );
                }
            }
        }
    }

    #[test]
    fn test_wrap_and_measure_latin1_characters() {
        let font = FontTable::new();
        assert_eq!(font.wrap("é", 1000), vec![cut(0, 2)]);
        assert_eq!(font.measure_width("é", 0, 2), font.width(0xE9));
        assert_eq!(font.measure_width("日", 0, 3), font.width(b'?'));

        let one = font.width(0xE9);
        assert_eq!(font.wrap("éé", one), vec![cut(0, 2), cut(2, 4)]);
        assert_eq!(font.wrap("é é", one), vec![cut(0, 2), cut(3, 5)]);
        assert_eq!(font.wrap("日", 1), vec![cut(0, 3), cut(3, 3)]);
    }

    #[test]
    fn test_draw_text_uses_latin1_glyph() {
        let font = FontTable::new();
        let mut canvas = Canvas::new(16, 10);

        font.draw_text(
            &mut canvas,
            "é",
            Color::WHITE,
            Rect::new(0, 0, 16, 10),
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
        );

        let expected: Vec<(u32, u32)> = (0..GLYPH_HEIGHT)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| font.is_lit(0xE9, x, y))
            .collect();
        let mut lit = lit_pixels(&canvas, Color::WHITE);
        lit.sort_by_key(|&(x, y)| (y, x));
        assert!(!expected.is_empty());
        assert_eq!(lit, expected);
    }

    #[test]
    fn test_rendered_width_is_widest_line() {
        let font = FontTable::new();
        let text = "ab\nabcd\nc";
        assert_eq!(font.rendered_width(text), font.measure_width(text, 3, 7));
        assert_eq!(font.rendered_width(""), 0);
        assert_eq!(font.block_height(text), 3 * GLYPH_HEIGHT);
    }

    #[test]
    fn test_draw_text_restores_draw_color() {
        let font = FontTable::new();
        let mut canvas = Canvas::new(64, 16);
        canvas.set_draw_color(Color::rgb(1, 2, 3));

        font.draw_text(
            &mut canvas,
            "Hi",
            Color::WHITE,
            Rect::new(0, 0, 64, 16),
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
        );

        assert_eq!(canvas.draw_color(), Color::rgb(1, 2, 3));
        assert!(!lit_pixels(&canvas, Color::WHITE).is_empty());
    }

    #[test]
    fn test_draw_text_centers_each_line() {
        let font = FontTable::new();
        let mut canvas = Canvas::new(100, 10);
        let text = "ab";
        let left = (100 - font.measure_width(text, 0, 2)) / 2;

        font.draw_text(
            &mut canvas,
            text,
            Color::WHITE,
            Rect::new(0, 0, 100, 10),
            HorizontalAlignment::Center,
            VerticalAlignment::Top,
        );

        let lit = lit_pixels(&canvas, Color::WHITE);
        assert_eq!(lit.iter().map(|&(x, _)| x).min(), Some(left));
    }

    /// Lines that do not fit in the destination height are dropped.
    #[test]
    fn test_draw_text_clamps_lines_to_height() {
        let font = FontTable::new();
        let mut canvas = Canvas::new(40, 40);

        font.draw_text(
            &mut canvas,
            "a\nb\nc",
            Color::WHITE,
            Rect::new(0, 0, 40, 25),
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
        );

        let lit = lit_pixels(&canvas, Color::WHITE);
        assert!(lit.iter().any(|&(_, y)| y >= 10 && y < 20));
        assert!(lit.iter().all(|&(_, y)| y < 20));
    }

    #[test]
    fn test_draw_text_bottom_alignment() {
        let font = FontTable::new();
        let mut canvas = Canvas::new(40, 40);

        font.draw_text(
            &mut canvas,
            "a",
            Color::WHITE,
            Rect::new(0, 0, 40, 40),
            HorizontalAlignment::Right,
            VerticalAlignment::Bottom,
        );

        let lit = lit_pixels(&canvas, Color::WHITE);
        assert!(lit.iter().all(|&(_, y)| y >= 30));
        let right = lit.iter().map(|&(x, _)| x).max();
        // One column of spacing sits after the rightmost lit column.
        assert_eq!(right, Some(40 - 2));
    }

    /// Every fill pixel is surrounded by fill or outline, never the background.
    #[test]
    fn test_outlined_text_has_halo() {
        let font = FontTable::new();
        let mut canvas = Canvas::new(48, 16);
        canvas.set_draw_color(Color::rgb(0, 0, 255));
        canvas.clear();
        let outline = Color::rgb(255, 0, 0);

        font.draw_text_outlined(
            &mut canvas,
            "Ok",
            Color::WHITE,
            outline,
            Rect::new(0, 0, 48, 16),
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
        );

        let fill = lit_pixels(&canvas, Color::WHITE);
        assert!(!fill.is_empty());
        assert!(!lit_pixels(&canvas, outline).is_empty());
        for (x, y) in fill {
            for ny in y.saturating_sub(1)..=y + 1 {
                for nx in x.saturating_sub(1)..=x + 1 {
                    let p = canvas.pixel(nx, ny);
                    assert!(
                        p == Some(Color::WHITE) || p == Some(outline),
                        "({nx}, {ny}) next to fill ({x}, {y}) is {p:?}"
                    );
                }
            }
        }
        assert_eq!(canvas.draw_color(), Color::rgb(0, 0, 255));
    }
}
