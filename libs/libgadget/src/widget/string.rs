//! Single-line text and integer entry fields.

use libraster::font::GLYPH_WIDTH;
use libraster::RastPort;

use crate::gadget::{Gadget, GadgetFlags};
use crate::mouse::Transition;
use crate::rect::Rect;
use crate::text;
use crate::theme::Theme;
use crate::widget::{self, Reaction};

fn field(theme: &Theme, g: &Gadget) -> Rect {
    let rect = g.rect();
    if g.flags.contains(GadgetFlags::BORDER) {
        Rect::new(
            rect.x + theme.field_inset,
            rect.y + 2,
            rect.w - 2 * theme.field_inset,
            rect.h - 4,
        )
    } else {
        rect
    }
}

/// Characters that fit in the visible field.
pub fn columns(theme: &Theme, g: &Gadget) -> usize {
    (field(theme, g).w.max(0) as usize) / GLYPH_WIDTH
}

/// Field contents padded with spaces to the buffer limit, from the display
/// origin on, so stale characters are always overwritten. The cursor cell
/// is drawn inverted when `cursor_on` and the gadget holds focus.
pub fn render(rp: &mut RastPort, theme: &Theme, g: &mut Gadget, cursor_on: bool) {
    let rect = g.rect();
    let cols = columns(theme, g);
    let area = field(theme, g);
    let active = g.is_active();
    if g.flags.contains(GadgetFlags::BORDER) {
        widget::ridge(rp, theme, &rect);
    }
    widget::draw_label(rp, theme, g, None);

    let Some(si) = g.kind.string_info_mut() else {
        return;
    };
    si.scroll_to_cursor(cols);
    let ty = area.y + (area.h - text::text_height()) / 2;
    let visible = cols.min(si.max_chars() + 1 - si.disp_pos().min(si.max_chars()));
    let bytes = si.as_bytes();
    for col in 0..visible {
        let index = si.disp_pos() + col;
        let ch = bytes.get(index).copied().unwrap_or(b' ');
        let x = area.x + (col * GLYPH_WIDTH) as i32;
        let under_cursor = active && cursor_on && index == si.cursor();
        let (fg, bg) = if under_cursor {
            (theme.fill_text, theme.fill)
        } else {
            (theme.text, theme.background)
        };
        text::draw_text(rp, &[ch], x, ty, fg, Some(bg));
    }
}

/// A click takes focus and drops the cursor under the pointer.
pub fn react(g: &mut Gadget, theme: &Theme, transition: Transition, x: i32) -> Reaction {
    if transition != Transition::InitialClick {
        return Reaction::default();
    }
    let origin = field(theme, g).x;
    if let Some(si) = g.kind.string_info_mut() {
        let column = ((x - origin).max(0) as usize) / GLYPH_WIDTH;
        si.cursor_from_column(column);
    }
    Reaction {
        redraw: true,
        activate: true,
        ..Reaction::default()
    }
}
