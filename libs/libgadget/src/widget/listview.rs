//! Read-only list of labels with a single selectable row.

use libraster::RastPort;

use crate::gadget::{Gadget, GadgetKind};
use crate::layout;
use crate::mouse::Transition;
use crate::rect::Rect;
use crate::text;
use crate::theme::Theme;
use crate::widget::{self, Reaction};

pub const ROW_HEIGHT: i32 = 10;

fn rows_area(g: &Gadget) -> Rect {
    g.rect().inset(2)
}

/// Rows that fit inside the frame.
pub fn visible_rows(g: &Gadget) -> usize {
    (rows_area(g).h.max(0) / ROW_HEIGHT) as usize
}

pub fn render(rp: &mut RastPort, theme: &Theme, g: &Gadget) {
    widget::bevel(rp, theme, &g.rect(), true);
    widget::draw_label(rp, theme, g, None);
    let GadgetKind::ListView(Some(info)) = &g.kind else {
        return;
    };
    let area = rows_area(g);
    let count = info.labels.len().min(visible_rows(g));
    let cols = (area.w.max(0) / text::text_width(b" ")) as usize;
    for (i, row) in layout::v_stack(&area, ROW_HEIGHT, count, 0).iter().enumerate() {
        let shown = info.displayed.map(usize::from) == Some(i);
        let (fg, bg) = if shown {
            (theme.fill_text, theme.fill)
        } else {
            (theme.text, theme.background)
        };
        let (x1, y1, x2, y2) = row.corners();
        rp.rect_fill(bg, x1, y1, x2, y2);
        let bytes = info.labels[i].as_bytes();
        let bytes = &bytes[..bytes.len().min(cols.saturating_sub(1))];
        text::draw_text(rp, bytes, row.x + 2, row.y + 1, fg, None);
    }
}

pub fn react(g: &mut Gadget, transition: Transition, y: i32) -> Reaction {
    let count = match &g.kind {
        GadgetKind::ListView(Some(info)) => info.labels.len().min(visible_rows(g)),
        _ => 0,
    };
    if count == 0 {
        return Reaction::default();
    }
    let under = layout::v_stack_index(&rows_area(g), ROW_HEIGHT, count, 0, y) as u16;
    let GadgetKind::ListView(Some(info)) = &mut g.kind else {
        return Reaction::default();
    };
    let before = info.displayed;
    match transition {
        Transition::InitialClick | Transition::MovedBack | Transition::DragOver => {
            info.displayed = Some(under);
        }
        Transition::MovedAway | Transition::ReleaseOff => info.displayed = info.selected,
        Transition::ReleaseOn => {
            info.displayed = Some(under);
            info.selected = Some(under);
            return Reaction::commit(under);
        }
    }
    Reaction {
        redraw: info.displayed != before,
        down_code: under,
        ..Reaction::default()
    }
}
