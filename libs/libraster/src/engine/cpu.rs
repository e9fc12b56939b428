//! Reference engine: one pixel at a time.

use super::{clip_rect, in_gray_pattern, mark_line, RasterEngine};
use crate::bitmap::BitMap;
use crate::color::Pen;
use crate::line::LineSteps;

/// Bit-set rendering on the CPU.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cpu;

impl RasterEngine for Cpu {
    fn line(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        for (x, y) in LineSteps::new(x1, y1, x2, y2) {
            if bm.contains(x, y) {
                bm.plot(x as usize, y as usize, pen);
            }
        }
        mark_line(bm, x1, y1, x2, y2);
    }

    fn rect_fill(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        let Some(c) = clip_rect(bm, x1, y1, x2, y2) else {
            return;
        };
        for y in c.y1..=c.y2 {
            for x in c.x1..=c.x2 {
                bm.plot(x, y, pen);
            }
        }
        c.mark(bm);
    }

    fn gray_fill(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        let Some(c) = clip_rect(bm, x1, y1, x2, y2) else {
            return;
        };
        for y in c.y1..=c.y2 {
            for x in c.x1..=c.x2 {
                if in_gray_pattern(x, y) {
                    bm.plot(x, y, pen);
                }
            }
        }
        c.mark(bm);
    }

    fn glyph(&self, bm: &mut BitMap, rows: &[u8; 8], x: i32, y: i32, fg: Pen, bg: Option<Pen>) {
        for (dy, &row) in rows.iter().enumerate() {
            for dx in 0..8 {
                let px = x + dx;
                let py = y + dy as i32;
                if !bm.contains(px, py) {
                    continue;
                }
                if row & (1 << dx) != 0 {
                    bm.plot(px as usize, py as usize, fg);
                } else if let Some(bg) = bg {
                    bm.plot(px as usize, py as usize, bg);
                }
            }
        }
        if let Some(c) = clip_rect(bm, x, y, x + 7, y + 7) {
            c.mark(bm);
        }
    }
}
