//! Drawing context: a bitmap plus pens, draw mode, cursor and engine choice.

use crate::area::{AreaInfo, TmpRas};
use crate::bitmap::BitMap;
use crate::color::Pen;
use crate::engine::{Backend, RasterEngine};
use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

/// How text and patterned fills treat background pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Only foreground pixels are written.
    #[default]
    Jam1,
    /// Background pixels are painted with the background pen.
    Jam2,
}

/// A bitmap and the drawing state that goes with it.
pub struct RastPort {
    bitmap: BitMap,
    backend: Backend,
    fg_pen: Pen,
    bg_pen: Pen,
    outline_pen: Option<Pen>,
    draw_mode: DrawMode,
    cp_x: i32,
    cp_y: i32,
    pub(crate) area: Option<AreaInfo>,
    pub(crate) tmp_ras: Option<TmpRas>,
    pub(crate) area_pattern: Option<&'static [u16]>,
}

impl RastPort {
    pub fn new(bitmap: BitMap, backend: Backend) -> Self {
        Self {
            bitmap,
            backend,
            fg_pen: 1,
            bg_pen: 0,
            outline_pen: None,
            draw_mode: DrawMode::Jam2,
            cp_x: 0,
            cp_y: 0,
            area: None,
            tmp_ras: None,
            area_pattern: None,
        }
    }

    pub fn bitmap(&self) -> &BitMap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut BitMap {
        &mut self.bitmap
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    fn engine(&self) -> &'static dyn RasterEngine {
        self.backend.engine()
    }

    pub fn width(&self) -> i32 {
        self.bitmap.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.bitmap.height() as i32
    }

    pub fn a_pen(&self) -> Pen {
        self.fg_pen
    }

    pub fn b_pen(&self) -> Pen {
        self.bg_pen
    }

    pub fn outline_pen(&self) -> Option<Pen> {
        self.outline_pen
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_a_pen(&mut self, pen: Pen) {
        self.fg_pen = pen;
    }

    pub fn set_b_pen(&mut self, pen: Pen) {
        self.bg_pen = pen;
    }

    /// Pen used to outline area fills; `None` disables the outline.
    pub fn set_outline_pen(&mut self, pen: Option<Pen>) {
        self.outline_pen = pen;
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    /// Current drawing cursor.
    pub fn cursor(&self) -> (i32, i32) {
        (self.cp_x, self.cp_y)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.cp_x = x;
        self.cp_y = y;
    }

    /// Line from the cursor to (x, y) in the foreground pen; the cursor follows.
    pub fn draw_to(&mut self, x: i32, y: i32) {
        let (x1, y1) = (self.cp_x, self.cp_y);
        let pen = self.fg_pen;
        self.line(pen, x1, y1, x, y);
        self.move_to(x, y);
    }

    pub fn put_pixel(&mut self, pen: Pen, x: i32, y: i32) {
        self.bitmap.put_pixel(x, y, pen);
    }

    pub fn line(&mut self, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.engine().line(&mut self.bitmap, pen, x1, y1, x2, y2);
    }

    pub fn rect_fill(&mut self, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.engine().rect_fill(&mut self.bitmap, pen, x1, y1, x2, y2);
    }

    pub fn rect_outline(&mut self, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.engine().rect_outline(&mut self.bitmap, pen, x1, y1, x2, y2);
    }

    pub fn gray_fill(&mut self, pen: Pen, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.engine().gray_fill(&mut self.bitmap, pen, x1, y1, x2, y2);
    }

    /// Fill the whole bitmap with one pen.
    pub fn clear(&mut self, pen: Pen) {
        self.bitmap.clear(pen);
    }

    /// Blit `text` starting at (x, y) with explicit pens. `bg` of `None`
    /// leaves background pixels alone.
    ///
    /// The cursor advances one glyph per byte and wraps to the start of the
    /// next glyph row when the next glyph would cross the right edge. On
    /// return the cursor sits just past the last glyph.
    pub fn text(&mut self, text: &[u8], x: i32, y: i32, fg: Pen, bg: Option<Pen>) {
        self.move_to(x, y);
        let engine = self.engine();
        let width = self.width();
        for &ch in text {
            if self.cp_x + GLYPH_WIDTH as i32 > width && self.cp_x > 0 {
                self.cp_x = 0;
                self.cp_y += GLYPH_HEIGHT as i32;
            }
            engine.glyph(&mut self.bitmap, font::glyph(ch), self.cp_x, self.cp_y, fg, bg);
            self.cp_x += GLYPH_WIDTH as i32;
        }
    }

    /// Blit `text` at the cursor using the rastport pens and draw mode.
    pub fn text_at_cursor(&mut self, text: &[u8]) {
        let bg = match self.draw_mode {
            DrawMode::Jam1 => None,
            DrawMode::Jam2 => Some(self.bg_pen),
        };
        let (x, y) = self.cursor();
        self.text(text, x, y, self.fg_pen, bg);
    }
}
