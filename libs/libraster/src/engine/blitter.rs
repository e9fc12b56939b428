//! Accelerator engine: plane words with first/last-word masks.
//!
//! Fills round the span out to word alignment and mask the edge words; lines
//! walk a word address and a single-bit mask, stepping the address by one
//! word horizontally when the mask rotates out and by a row modulo vertically.

use super::{clip_rect, mark_line, Clipped, RasterEngine};
use crate::bitmap::{BitMap, WORD_BITS};
use crate::color::Pen;
use crate::font;
use crate::line::LineSteps;

/// Word-oriented rendering in the style of the line/fill accelerator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blitter;

/// Checkerboard word for a scan line. Even rows light even columns; because
/// words are 16-pixel aligned, the phase never shifts between words.
#[inline]
fn gray_word(y: usize) -> u16 {
    if y % 2 == 0 {
        0xAAAA
    } else {
        0x5555
    }
}

/// Mask of the columns of word `wx` that fall inside the bitmap.
#[inline]
fn valid_columns(bm: &BitMap, wx: usize) -> u16 {
    let first_col = wx * WORD_BITS;
    let remaining = bm.width().saturating_sub(first_col);
    if remaining >= WORD_BITS {
        0xFFFF
    } else {
        !(0xFFFFu16 >> remaining)
    }
}

impl Blitter {
    fn fill_span(bm: &mut BitMap, pen: Pen, c: Clipped, pattern: Option<fn(usize) -> u16>) {
        let first_word = c.x1 / WORD_BITS;
        let last_word = c.x2 / WORD_BITS;
        let first_mask = 0xFFFFu16 >> (c.x1 % WORD_BITS);
        let last_mask = 0xFFFFu16 << (WORD_BITS - 1 - c.x2 % WORD_BITS);
        let modulo = bm.words_per_row();

        for plane in 0..bm.depth() {
            let set = pen & (1 << plane) != 0;
            for y in c.y1..=c.y2 {
                let pattern_word = pattern.map_or(0xFFFF, |p| p(y));
                let row = y * modulo;
                for wx in first_word..=last_word {
                    let mut mask = 0xFFFF;
                    if wx == first_word {
                        mask &= first_mask;
                    }
                    if wx == last_word {
                        mask &= last_mask;
                    }
                    bm.merge_word(plane, row + wx, mask & pattern_word, set);
                }
            }
        }
        c.mark(bm);
    }
}

impl RasterEngine for Blitter {
    fn line(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        let modulo = bm.words_per_row() as isize;
        let mut steps = LineSteps::new(x1, y1, x2, y2);
        let Some((mut x, mut y)) = steps.next() else {
            return;
        };

        // The address may wander off the bitmap while the line is clipped;
        // it is only dereferenced for on-screen points.
        let mut address = y as isize * modulo + x.div_euclid(WORD_BITS as i32) as isize;
        let mut mask: u16 = 0x8000 >> x.rem_euclid(WORD_BITS as i32);

        loop {
            if bm.contains(x, y) {
                for plane in 0..bm.depth() {
                    bm.merge_word(plane, address as usize, mask, pen & (1 << plane) != 0);
                }
            }
            let Some((nx, ny)) = steps.next() else {
                break;
            };
            match nx - x {
                1 => {
                    mask = mask.rotate_right(1);
                    if mask == 0x8000 {
                        address += 1;
                    }
                }
                -1 => {
                    mask = mask.rotate_left(1);
                    if mask == 0x0001 {
                        address -= 1;
                    }
                }
                _ => {}
            }
            address += (ny - y) as isize * modulo;
            x = nx;
            y = ny;
        }
        mark_line(bm, x1, y1, x2, y2);
    }

    fn rect_fill(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        if let Some(c) = clip_rect(bm, x1, y1, x2, y2) {
            Self::fill_span(bm, pen, c, None);
        }
    }

    fn gray_fill(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        if let Some(c) = clip_rect(bm, x1, y1, x2, y2) {
            Self::fill_span(bm, pen, c, Some(gray_word));
        }
    }

    fn glyph(&self, bm: &mut BitMap, rows: &[u8; 8], x: i32, y: i32, fg: Pen, bg: Option<Pen>) {
        let modulo = bm.words_per_row();
        let first_word = x.div_euclid(WORD_BITS as i32);
        let shift = x.rem_euclid(WORD_BITS as i32) as u32;

        for (dy, &row) in rows.iter().enumerate() {
            let py = y + dy as i32;
            if py < 0 || py as usize >= bm.height() {
                continue;
            }
            // Glyph row and cell mask positioned in a 32-bit window spanning
            // two plane words.
            let data = (font::row_msb_first(row) as u32) << (24 - shift);
            let cell = 0xFFu32 << (24 - shift);

            for (i, wx) in [first_word, first_word + 1].into_iter().enumerate() {
                if wx < 0 || wx as usize >= modulo {
                    continue;
                }
                let wx = wx as usize;
                let part = if i == 0 { 16 } else { 0 };
                let valid = valid_columns(bm, wx);
                let ink = ((data >> part) as u16) & valid;
                let paper = (((cell & !data) >> part) as u16) & valid;
                let index = py as usize * modulo + wx;
                for plane in 0..bm.depth() {
                    bm.merge_word(plane, index, ink, fg & (1 << plane) != 0);
                    if let Some(bg) = bg {
                        bm.merge_word(plane, index, paper, bg & (1 << plane) != 0);
                    }
                }
            }
        }
        if let Some(c) = clip_rect(bm, x, y, x + 7, y + 7) {
            c.mark(bm);
        }
    }
}
