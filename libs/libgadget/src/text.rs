//! Text runs and the helpers that put them on a rastport.

use alloc::string::String;
use alloc::vec::Vec;

use libraster::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use libraster::{DrawMode, Pen, RastPort};

use crate::layout;
use crate::rect::Rect;

/// One positioned, coloured piece of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub fg: Pen,
    pub bg: Pen,
    pub mode: DrawMode,
    /// Offset from the owner's origin.
    pub left: i32,
    pub top: i32,
    pub text: String,
}

impl TextRun {
    pub fn new(text: &str) -> Self {
        Self {
            fg: 1,
            bg: 0,
            mode: DrawMode::Jam1,
            left: 0,
            top: 0,
            text: String::from(text),
        }
    }

    /// Right edge of the run relative to the owner's origin.
    pub fn extent(&self) -> i32 {
        self.left + text_width(self.text.as_bytes())
    }
}

/// A chain of text runs drawn together, e.g. a gadget label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntuiText {
    pub runs: Vec<TextRun>,
}

impl IntuiText {
    pub fn new(text: &str) -> Self {
        Self {
            runs: alloc::vec![TextRun::new(text)],
        }
    }

    /// Set the pens of the last run.
    pub fn pens(mut self, fg: Pen, bg: Pen) -> Self {
        if let Some(run) = self.runs.last_mut() {
            run.fg = fg;
            run.bg = bg;
        }
        self
    }

    /// Set the draw mode of the last run.
    pub fn mode(mut self, mode: DrawMode) -> Self {
        if let Some(run) = self.runs.last_mut() {
            run.mode = mode;
        }
        self
    }

    /// Set the offset of the last run.
    pub fn offset(mut self, left: i32, top: i32) -> Self {
        if let Some(run) = self.runs.last_mut() {
            run.left = left;
            run.top = top;
        }
        self
    }

    /// Append another run after the existing ones.
    pub fn chain(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn first_text(&self) -> &str {
        self.runs.first().map(|r| r.text.as_str()).unwrap_or("")
    }

    /// Bounding width of the whole chain.
    pub fn width(&self) -> i32 {
        self.runs.iter().map(TextRun::extent).max().unwrap_or(0)
    }

    /// Bounding height of the whole chain.
    pub fn height(&self) -> i32 {
        self.runs
            .iter()
            .map(|r| r.top + GLYPH_HEIGHT as i32)
            .max()
            .unwrap_or(0)
    }

    /// Remove the first `marker` byte from the first run and report the
    /// index of the character that followed it. Only ASCII markers count.
    pub fn take_underscore(&mut self, marker: u8) -> Option<usize> {
        if !marker.is_ascii() {
            return None;
        }
        let run = self.runs.first_mut()?;
        let at = run.text.bytes().position(|b| b == marker)?;
        run.text.remove(at);
        (at < run.text.len()).then_some(at)
    }
}

/// Measure the pixel width of a byte string in the 8x8 font.
pub fn text_width(text: &[u8]) -> i32 {
    font::text_width(text) as i32
}

/// Return the line height of the 8x8 font.
pub fn text_height() -> i32 {
    font::metrics().char_height as i32
}

/// Draw text at the given position. Nothing is drawn if it would start
/// off-screen to the left or top.
pub fn draw_text(rp: &mut RastPort, text: &[u8], x: i32, y: i32, fg: Pen, bg: Option<Pen>) {
    if x < 0 || y < 0 {
        return;
    }
    rp.text(text, x, y, fg, bg);
}

/// Draw text centered within a rectangle.
pub fn draw_text_centered(rp: &mut RastPort, text: &[u8], rect: &Rect, fg: Pen) {
    let at = layout::center(rect, text_width(text), text_height());
    draw_text(rp, text, at.x, at.y, fg, None);
}

/// Draw every run of `itext` relative to (x, y).
pub fn draw_runs(rp: &mut RastPort, itext: &IntuiText, x: i32, y: i32) {
    for run in &itext.runs {
        let bg = match run.mode {
            DrawMode::Jam1 => None,
            DrawMode::Jam2 => Some(run.bg),
        };
        draw_text(rp, run.text.as_bytes(), x + run.left, y + run.top, run.fg, bg);
    }
}

/// Underline the `index`th glyph of text drawn at (x, y).
pub fn underline(rp: &mut RastPort, x: i32, y: i32, index: usize, pen: Pen) {
    let ux = x + index as i32 * GLYPH_WIDTH as i32;
    let uy = y + GLYPH_HEIGHT as i32 - 1;
    rp.rect_fill(pen, ux, uy, ux + GLYPH_WIDTH as i32 - 1, uy);
}
