//! Drawing engines.
//!
//! Every primitive exists twice: [`Cpu`] sets pixels one at a time, and
//! [`Blitter`] works a plane word at a time the way the line/fill accelerator
//! does (masked first and last words, address-and-mask line stepping). Both
//! produce identical pixels.

mod blitter;
mod cpu;

pub use blitter::Blitter;
pub use cpu::Cpu;

use crate::bitmap::BitMap;
use crate::color::Pen;

/// Primitive contracts shared by the engines. Coordinates are inclusive and
/// may arrive in any order; everything is clipped to the bitmap.
pub trait RasterEngine {
    /// 1-pixel line. Each plane is set where `pen` has that plane's bit and
    /// cleared otherwise, so erasing is drawing with pen 0.
    fn line(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Solid axis-aligned rectangle.
    fn rect_fill(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32);

    /// 50% checkerboard fill: only pixels where `x + y` is even are written,
    /// so adjacent fills line up regardless of their origin.
    fn gray_fill(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32);

    /// One 8x8 glyph with its top-left at (x, y). `bg` of `None` leaves
    /// background pixels untouched.
    fn glyph(&self, bm: &mut BitMap, rows: &[u8; 8], x: i32, y: i32, fg: Pen, bg: Option<Pen>);

    /// Rectangle outline built from four 1-pixel fills.
    fn rect_outline(&self, bm: &mut BitMap, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        self.rect_fill(bm, pen, x1, y1, x2, y1);
        self.rect_fill(bm, pen, x1, y2, x2, y2);
        self.rect_fill(bm, pen, x1, y1, x1, y2);
        self.rect_fill(bm, pen, x2, y1, x2, y2);
    }
}

/// Which engine a rastport draws with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Cpu,
    Blitter,
}

impl Backend {
    pub fn engine(self) -> &'static dyn RasterEngine {
        match self {
            Backend::Cpu => &Cpu,
            Backend::Blitter => &Blitter,
        }
    }
}

/// An inclusive rectangle already clipped to the bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Clipped {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

/// Normalize corner order and clip to the bitmap. `None` if nothing remains.
pub(crate) fn clip_rect(bm: &BitMap, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Clipped> {
    let w = bm.width() as i32;
    let h = bm.height() as i32;
    if w <= 0 || h <= 0 {
        return None;
    }
    let (x1, x2) = (x1.min(x2), x1.max(x2));
    let (y1, y2) = (y1.min(y2), y1.max(y2));
    if x2 < 0 || y2 < 0 || x1 >= w || y1 >= h {
        return None;
    }
    Some(Clipped {
        x1: x1.max(0) as usize,
        y1: y1.max(0) as usize,
        x2: x2.min(w - 1) as usize,
        y2: y2.min(h - 1) as usize,
    })
}

impl Clipped {
    pub(crate) fn mark(&self, bm: &mut BitMap) {
        bm.mark_dirty(
            self.x1 as i32,
            self.y1 as i32,
            (self.x2 - self.x1 + 1) as i32,
            (self.y2 - self.y1 + 1) as i32,
        );
    }
}

/// Bounding box of a line, clipped, for dirty tracking.
pub(crate) fn mark_line(bm: &mut BitMap, x1: i32, y1: i32, x2: i32, y2: i32) {
    if let Some(clipped) = clip_rect(bm, x1, y1, x2, y2) {
        clipped.mark(bm);
    }
}

/// Checkerboard membership shared by both gray-fill paths.
#[inline]
pub(crate) fn in_gray_pattern(x: usize, y: usize) -> bool {
    (x + y) % 2 == 0
}
