//! Planar bitmap with dirty-rectangle tracking.
//!
//! Pixels are stored as `depth` independent bit planes of 16-bit words, most
//! significant bit leftmost. A pixel's pen is the value formed by taking bit
//! `n` from plane `n`.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Palette, Pen};

/// Deepest supported bitmap (256 pens).
pub const MAX_DEPTH: usize = 8;

/// Pixels per plane word.
pub const WORD_BITS: usize = 16;

/// A dirty rectangle (pixel coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// A planar pixel buffer.
#[derive(Clone, Debug)]
pub struct BitMap {
    width: usize,
    height: usize,
    depth: usize,
    words_per_row: usize,
    planes: Vec<Vec<u16>>,
    dirty: Option<DirtyRect>,
}

impl BitMap {
    /// Allocate a cleared bitmap. `depth` is clamped to `1..=MAX_DEPTH`.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        let depth = depth.clamp(1, MAX_DEPTH);
        let words_per_row = width.div_ceil(WORD_BITS);
        let planes = (0..depth)
            .map(|_| vec![0u16; words_per_row * height])
            .collect();
        Self {
            width,
            height,
            depth,
            words_per_row,
            planes,
            dirty: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    pub fn bytes_per_row(&self) -> usize {
        self.words_per_row * 2
    }

    /// Returns true if (x, y) lies inside the bitmap.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Raw words of one plane.
    pub fn plane(&self, n: usize) -> &[u16] {
        &self.planes[n]
    }

    pub(crate) fn plane_mut(&mut self, n: usize) -> &mut [u16] {
        &mut self.planes[n]
    }

    /// Index of the word holding pixel (x, y) within a plane.
    #[inline]
    pub fn word_index(&self, x: usize, y: usize) -> usize {
        y * self.words_per_row + x / WORD_BITS
    }

    /// Single-bit mask selecting column `x` within its word.
    #[inline]
    pub fn bit_mask(x: usize) -> u16 {
        0x8000 >> (x % WORD_BITS)
    }

    /// Read the pen at (x, y). Out-of-range reads return pen 0.
    pub fn pixel(&self, x: i32, y: i32) -> Pen {
        if !self.contains(x, y) {
            return 0;
        }
        let index = self.word_index(x as usize, y as usize);
        let mask = Self::bit_mask(x as usize);
        let mut pen = 0u8;
        for (n, plane) in self.planes.iter().enumerate() {
            if plane[index] & mask != 0 {
                pen |= 1 << n;
            }
        }
        pen
    }

    /// Write a single pixel. Expands the dirty rect.
    pub fn put_pixel(&mut self, x: i32, y: i32, pen: Pen) {
        if !self.contains(x, y) {
            return;
        }
        self.plot(x as usize, y as usize, pen);
        self.expand_dirty(x, y, 1, 1);
    }

    /// Write a pixel already known to be in range, without dirty tracking.
    #[inline]
    pub(crate) fn plot(&mut self, x: usize, y: usize, pen: Pen) {
        let index = self.word_index(x, y);
        let mask = Self::bit_mask(x);
        for (n, plane) in self.planes.iter_mut().enumerate() {
            if pen & (1 << n) != 0 {
                plane[index] |= mask;
            } else {
                plane[index] &= !mask;
            }
        }
    }

    /// Merge `mask` into one word of one plane: set where the plane's pen bit
    /// is on, clear where it is off.
    #[inline]
    pub(crate) fn merge_word(&mut self, plane: usize, index: usize, mask: u16, set: bool) {
        let word = &mut self.planes[plane][index];
        if set {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Fill the entire bitmap with one pen. Marks the full bitmap dirty.
    pub fn clear(&mut self, pen: Pen) {
        for (n, plane) in self.planes.iter_mut().enumerate() {
            let fill = if pen & (1 << n) != 0 { 0xFFFF } else { 0 };
            plane.iter_mut().for_each(|w| *w = fill);
        }
        self.dirty = Some(DirtyRect {
            x: 0,
            y: 0,
            w: self.width as i32,
            h: self.height as i32,
        });
    }

    /// Expand the dirty rect to include a new region.
    pub fn mark_dirty(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.expand_dirty(x, y, w, h);
    }

    /// Take and reset the current dirty rect. Returns `None` if nothing was drawn.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    fn expand_dirty(&mut self, x: i32, y: i32, w: i32, h: i32) {
        match self.dirty {
            Some(ref mut d) => {
                let x2 = (d.x + d.w).max(x + w);
                let y2 = (d.y + d.h).max(y + h);
                d.x = d.x.min(x);
                d.y = d.y.min(y);
                d.w = x2 - d.x;
                d.h = y2 - d.y;
            }
            None => {
                self.dirty = Some(DirtyRect { x, y, w, h });
            }
        }
    }

    /// True when both bitmaps have the same geometry and identical plane contents.
    pub fn same_pixels(&self, other: &BitMap) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.depth == other.depth
            && self.planes == other.planes
    }

    /// Convert the planar image into a linear framebuffer through `palette`.
    ///
    /// `buf` is `stride` bytes per row with `bpp` bytes per pixel. Rows or
    /// columns that do not fit are skipped.
    pub fn write_chunky(
        &self,
        palette: &Palette,
        buf: &mut [u8],
        stride: usize,
        bpp: usize,
        is_bgr: bool,
    ) {
        if bpp == 0 {
            return;
        }
        for y in 0..self.height {
            let row_start = y * stride;
            if row_start >= buf.len() {
                break;
            }
            let row_end = (row_start + stride).min(buf.len());
            let row = &mut buf[row_start..row_end];
            for (x, chunk) in row.chunks_exact_mut(bpp).take(self.width).enumerate() {
                let pixel = palette
                    .get(self.pixel(x as i32, y as i32))
                    .to_pixel_bytes(bpp, is_bgr);
                chunk.copy_from_slice(&pixel[..bpp]);
            }
        }
    }
}
