//! Retained polygon fill: `area_move` / `area_draw` / `area_end`.
//!
//! Vertices are batched into an [`AreaInfo`] with a fixed capacity chosen by
//! the caller. `area_end` closes every sub-polygon, rasterizes the region
//! into a [`TmpRas`] scratch mask and composites the mask through the area
//! pattern in the foreground pen.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::bitmap::WORD_BITS;
use crate::line::LineSteps;
use crate::rastport::{DrawMode, RastPort};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VertexKind {
    Move,
    Draw,
}

#[derive(Clone, Copy, Debug)]
struct Vertex {
    x: i32,
    y: i32,
    kind: VertexKind,
}

/// Inclusive bounding box of the queued vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    fn point(x: i32, y: i32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn extend(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    /// Bytes per row of a word-aligned mask covering the box.
    pub fn mask_stride(&self) -> usize {
        self.width().div_ceil(WORD_BITS) * 2
    }
}

/// Vertex buffer for one batched fill.
#[derive(Clone, Debug)]
pub struct AreaInfo {
    vertices: Vec<Vertex>,
    capacity: usize,
    bounds: Option<Bounds>,
}

impl AreaInfo {
    pub fn new(max_vectors: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vectors),
            capacity: max_vectors,
            bounds: None,
        }
    }

    /// Vertices currently queued.
    pub fn count(&self) -> usize {
        self.vertices.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn push(&mut self, x: i32, y: i32, kind: VertexKind) -> Result<(), AreaError> {
        if self.vertices.len() >= self.capacity {
            return Err(AreaError::VectorFull);
        }
        self.vertices.push(Vertex { x, y, kind });
        match self.bounds {
            Some(ref mut b) => b.extend(x, y),
            None => self.bounds = Some(Bounds::point(x, y)),
        }
        Ok(())
    }

    fn recompute_bounds(&mut self) {
        let mut points = self.vertices.iter();
        self.bounds = points.next().map(|first| {
            let mut b = Bounds::point(first.x, first.y);
            points.for_each(|v| b.extend(v.x, v.y));
            b
        });
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.bounds = None;
    }

    /// Edges of every sub-polygon, each closed back to its start point.
    fn edges(&self) -> Vec<(i32, i32, i32, i32)> {
        let mut edges = Vec::with_capacity(self.vertices.len() + 1);
        let mut start: Option<(i32, i32)> = None;
        let mut last = (0, 0);
        for v in &self.vertices {
            match v.kind {
                VertexKind::Move => {
                    if let Some(s) = start {
                        if s != last {
                            edges.push((last.0, last.1, s.0, s.1));
                        }
                    }
                    start = Some((v.x, v.y));
                }
                VertexKind::Draw => edges.push((last.0, last.1, v.x, v.y)),
            }
            last = (v.x, v.y);
        }
        if let Some(s) = start {
            if s != last {
                edges.push((last.0, last.1, s.0, s.1));
            }
        }
        edges
    }
}

/// Scratch mask memory for area fills.
#[derive(Clone, Debug)]
pub struct TmpRas {
    words: Vec<u16>,
}

impl TmpRas {
    pub fn new(size_bytes: usize) -> Self {
        Self {
            words: vec![0; size_bytes / 2],
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.words.len() * 2
    }
}

/// Failures reported by the area-fill calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaError {
    /// `init_area` was never called on this rastport.
    NoAreaInfo,
    /// More vertices than the reserved capacity.
    VectorFull,
    /// No scratch mask installed.
    NoTmpRas,
    /// The scratch mask is smaller than the polygon's bounding box.
    TmpRasTooSmall { needed: usize, available: usize },
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaError::NoAreaInfo => write!(f, "no area info installed"),
            AreaError::VectorFull => write!(f, "area vertex buffer full"),
            AreaError::NoTmpRas => write!(f, "no scratch raster installed"),
            AreaError::TmpRasTooSmall { needed, available } => {
                write!(f, "scratch raster too small: need {} bytes, have {}", needed, available)
            }
        }
    }
}

/// A word-aligned 1-bit mask laid over the polygon bounding box.
struct Mask<'a> {
    words: &'a mut [u16],
    stride_words: usize,
    bounds: Bounds,
}

impl Mask<'_> {
    fn set(&mut self, x: i32, y: i32) {
        let lx = (x - self.bounds.min_x) as usize;
        let ly = (y - self.bounds.min_y) as usize;
        self.words[ly * self.stride_words + lx / WORD_BITS] |= 0x8000 >> (lx % WORD_BITS);
    }

    fn get(&self, x: i32, y: i32) -> bool {
        let lx = (x - self.bounds.min_x) as usize;
        let ly = (y - self.bounds.min_y) as usize;
        self.words[ly * self.stride_words + lx / WORD_BITS] & (0x8000 >> (lx % WORD_BITS)) != 0
    }

    /// Even-odd scanline fill sampled at each row, plus the edges themselves
    /// so boundary pixels are always covered.
    fn rasterize(&mut self, edges: &[(i32, i32, i32, i32)]) {
        let mut crossings: Vec<i32> = Vec::new();
        for y in self.bounds.min_y..=self.bounds.max_y {
            crossings.clear();
            for &(x0, y0, x1, y1) in edges {
                if y0 == y1 {
                    continue;
                }
                let (top, bottom) = (y0.min(y1), y0.max(y1));
                if y < top || y >= bottom {
                    continue;
                }
                crossings.push(x0 + (y - y0) * (x1 - x0) / (y1 - y0));
            }
            crossings.sort_unstable();
            for pair in crossings.chunks_exact(2) {
                for x in pair[0]..=pair[1] {
                    self.set(x, y);
                }
            }
        }
        for &(x0, y0, x1, y1) in edges {
            for (x, y) in LineSteps::new(x0, y0, x1, y1) {
                self.set(x, y);
            }
        }
    }
}

impl RastPort {
    /// Reserve room for `max_vectors` area vertices.
    pub fn init_area(&mut self, max_vectors: usize) {
        self.area = Some(AreaInfo::new(max_vectors));
    }

    pub fn area_info(&self) -> Option<&AreaInfo> {
        self.area.as_ref()
    }

    pub fn set_tmp_ras(&mut self, tmp_ras: TmpRas) {
        self.tmp_ras = Some(tmp_ras);
    }

    /// Fill pattern for `area_end`, one word per row, repeating vertically.
    /// `None` is solid.
    pub fn set_area_pattern(&mut self, pattern: Option<&'static [u16]>) {
        self.area_pattern = pattern.filter(|p| !p.is_empty());
    }

    /// Start a new sub-polygon at (x, y). A sub-polygon holding nothing but
    /// its move is replaced rather than kept.
    pub fn area_move(&mut self, x: i32, y: i32) -> Result<(), AreaError> {
        let area = self.area.as_mut().ok_or(AreaError::NoAreaInfo)?;
        if let Some(last) = area.vertices.last_mut() {
            if last.kind == VertexKind::Move {
                last.x = x;
                last.y = y;
                area.recompute_bounds();
                return Ok(());
            }
        }
        area.push(x, y, VertexKind::Move)
    }

    /// Append an edge to (x, y), extending the bounding box.
    pub fn area_draw(&mut self, x: i32, y: i32) -> Result<(), AreaError> {
        let area = self.area.as_mut().ok_or(AreaError::NoAreaInfo)?;
        let kind = if area.vertices.is_empty() {
            VertexKind::Move
        } else {
            VertexKind::Draw
        };
        area.push(x, y, kind)
    }

    /// Close all sub-polygons and fill them.
    ///
    /// The vertex buffer is emptied and the caller's pens, draw mode and
    /// cursor are restored whatever the outcome.
    pub fn area_end(&mut self) -> Result<(), AreaError> {
        let Some(area) = self.area.as_mut() else {
            return Err(AreaError::NoAreaInfo);
        };
        let edges = area.edges();
        let bounds = area.bounds;
        area.reset();

        let Some(bounds) = bounds else {
            return Ok(());
        };

        let saved_pen = self.a_pen();
        let saved_mode = self.draw_mode();
        let saved_cursor = self.cursor();

        let result = self.fill_area(&edges, bounds);

        self.set_a_pen(saved_pen);
        self.set_draw_mode(saved_mode);
        self.move_to(saved_cursor.0, saved_cursor.1);

        if let Err(err) = result {
            log::warn!("area fill failed: {}", err);
        }
        result
    }

    fn fill_area(&mut self, edges: &[(i32, i32, i32, i32)], bounds: Bounds) -> Result<(), AreaError> {
        let mut tmp_ras = self.tmp_ras.take().ok_or(AreaError::NoTmpRas)?;
        let stride = bounds.mask_stride();
        let needed = stride * bounds.height();
        if tmp_ras.size_bytes() < needed {
            let available = tmp_ras.size_bytes();
            self.tmp_ras = Some(tmp_ras);
            return Err(AreaError::TmpRasTooSmall { needed, available });
        }

        {
            let words = &mut tmp_ras.words[..needed / 2];
            words.iter_mut().for_each(|w| *w = 0);
            let mut mask = Mask {
                words,
                stride_words: stride / 2,
                bounds,
            };
            mask.rasterize(edges);
            self.composite(&mask);
        }
        self.tmp_ras = Some(tmp_ras);

        if let Some(outline) = self.outline_pen() {
            self.set_a_pen(outline);
            for &(x0, y0, x1, y1) in edges {
                self.move_to(x0, y0);
                self.draw_to(x1, y1);
            }
        }
        Ok(())
    }

    /// Write the foreground pen wherever the mask and pattern are both set.
    /// In `Jam2` mode, masked pixels outside the pattern get the background pen.
    fn composite(&mut self, mask: &Mask<'_>) {
        let fg = self.a_pen();
        let bg = match self.draw_mode() {
            DrawMode::Jam1 => None,
            DrawMode::Jam2 => Some(self.b_pen()),
        };
        let pattern = self.area_pattern;
        let b = mask.bounds;
        let bitmap = self.bitmap_mut();
        for y in b.min_y..=b.max_y {
            let pattern_word = pattern.map_or(0xFFFF, |p| p[y.rem_euclid(p.len() as i32) as usize]);
            for x in b.min_x..=b.max_x {
                if !mask.get(x, y) || !bitmap.contains(x, y) {
                    continue;
                }
                let lit = pattern_word & (0x8000 >> x.rem_euclid(WORD_BITS as i32)) != 0;
                if lit {
                    bitmap.put_pixel(x, y, fg);
                } else if let Some(bg) = bg {
                    bitmap.put_pixel(x, y, bg);
                }
            }
        }
    }
}
