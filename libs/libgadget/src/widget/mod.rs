//! Per-kind rendering and pointer reactions.

pub mod button;
pub mod checkbox;
pub mod listview;
pub mod mx;
pub mod string;
pub mod text;

use libraster::{Pen, RastPort};

use crate::gadget::{Gadget, GadgetFlags, GadgetKind, Place};
use crate::mouse::Transition;
use crate::rect::Rect;
use crate::text::{self as label_text, IntuiText};
use crate::theme::Theme;

/// What a gadget wants done after a pointer transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub redraw: bool,
    /// Commit: queue a GadgetUp with this code.
    pub up: Option<u16>,
    /// Code for a GadgetDown if the gadget asked for immediate reports.
    pub down_code: u16,
    /// Take keyboard focus.
    pub activate: bool,
}

impl Reaction {
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn commit(code: u16) -> Self {
        Self {
            redraw: true,
            up: Some(code),
            ..Self::default()
        }
    }
}

/// Redraw `g` completely.
pub fn render(rp: &mut RastPort, theme: &Theme, g: &mut Gadget, cursor_on: bool) {
    let rect = g.rect();
    if matches!(g.kind, GadgetKind::Context | GadgetKind::Generic) {
        return;
    }
    if !rect.is_empty() {
        let (x1, y1, x2, y2) = rect.corners();
        rp.rect_fill(theme.background, x1, y1, x2, y2);
    }
    match g.kind {
        GadgetKind::Button { .. } => button::render(rp, theme, g),
        GadgetKind::Checkbox(_) => checkbox::render(rp, theme, g),
        GadgetKind::Mx(_) => mx::render(rp, theme, g),
        GadgetKind::ListView(_) => listview::render(rp, theme, g),
        GadgetKind::Text(_) => text::render(rp, theme, g),
        GadgetKind::String(_) | GadgetKind::Integer(_) => string::render(rp, theme, g, cursor_on),
        GadgetKind::Context | GadgetKind::Generic => {}
    }
    if g.is_disabled() {
        ghost(rp, theme, &rect);
    }
}

/// Route a pointer transition to the gadget's kind.
pub fn react(g: &mut Gadget, theme: &Theme, transition: Transition, x: i32, y: i32) -> Reaction {
    match g.kind {
        GadgetKind::Button { .. } | GadgetKind::Generic => button::react(g, transition),
        GadgetKind::Checkbox(_) => checkbox::react(g, transition),
        GadgetKind::Mx(_) => mx::react(g, transition, y),
        GadgetKind::ListView(_) => listview::react(g, transition, y),
        GadgetKind::String(_) | GadgetKind::Integer(_) => string::react(g, theme, transition, x),
        GadgetKind::Context | GadgetKind::Text(_) => Reaction::default(),
    }
}

/// Dithered overlay marking a gadget disabled.
pub fn ghost(rp: &mut RastPort, theme: &Theme, rect: &Rect) {
    if rect.is_empty() {
        return;
    }
    let (x1, y1, x2, y2) = rect.corners();
    rp.gray_fill(theme.text, x1, y1, x2, y2);
}

/// Raised (or, with `recessed`, sunken) 1-pixel bevel around `rect`.
pub fn bevel(rp: &mut RastPort, theme: &Theme, rect: &Rect, recessed: bool) {
    if rect.w < 2 || rect.h < 2 {
        return;
    }
    let (light, dark) = if recessed {
        (theme.shadow, theme.shine)
    } else {
        (theme.shine, theme.shadow)
    };
    let (x1, y1, x2, y2) = rect.corners();
    rp.rect_fill(light, x1, y1, x2 - 1, y1);
    rp.rect_fill(light, x1, y1, x1, y2 - 1);
    rp.rect_fill(dark, x1 + 1, y2, x2, y2);
    rp.rect_fill(dark, x2, y1 + 1, x2, y2);
}

/// Double bevel: raised outside, sunken inside.
pub fn ridge(rp: &mut RastPort, theme: &Theme, rect: &Rect) {
    bevel(rp, theme, rect, false);
    bevel(rp, theme, &rect.inset(1), true);
}

/// Bevel style for a gadget's own flags.
pub fn frame(rp: &mut RastPort, theme: &Theme, g: &Gadget) {
    let pressed = g.flags.contains(GadgetFlags::SELECTED);
    let recessed = g.flags.contains(GadgetFlags::RECESSED);
    bevel(rp, theme, &g.rect(), pressed != recessed);
}

/// Top-left corner for a label of `itext` placed at `place` around `rect`.
fn label_origin(theme: &Theme, rect: &Rect, itext: &IntuiText, place: Place) -> (i32, i32) {
    let (w, h) = (itext.width(), itext.height());
    match place {
        Place::In => (rect.x + (rect.w - w) / 2, rect.y + (rect.h - h) / 2),
        Place::Left => (rect.x - theme.label_gap - w, rect.y + (rect.h - h) / 2),
        Place::Right => (rect.right() + theme.label_gap, rect.y + (rect.h - h) / 2),
        Place::Above => (rect.x + (rect.w - w) / 2, rect.y - h - 2),
    }
}

/// Draw `g`'s label at its placement. `pen` overrides the run pens.
pub fn draw_label(rp: &mut RastPort, theme: &Theme, g: &Gadget, pen: Option<Pen>) {
    let Some(label) = g.label.as_ref() else {
        return;
    };
    let rect = g.rect();
    let (mut x, y) = label_origin(theme, &rect, label, g.place);

    // A left label that would run off-screen loses its tail and stays
    // right-aligned against the gadget.
    let mut shown = label.clone();
    if g.place == Place::Left && x < 0 && shown.runs.len() == 1 {
        let text = &mut shown.runs[0].text;
        let mut fit = ((rect.x - theme.label_gap).max(0) / label_text::text_width(b" ")) as usize;
        fit = fit.min(text.len());
        while !text.is_char_boundary(fit) {
            fit -= 1;
        }
        text.truncate(fit);
        x = rect.x - theme.label_gap - shown.width();
    }
    if let Some(pen) = pen {
        for run in &mut shown.runs {
            run.fg = pen;
        }
    }
    label_text::draw_runs(rp, &shown, x, y);

    if let (Some(index), Some(run)) = (g.underscore, shown.runs.first()) {
        if index < run.text.len() {
            label_text::underline(rp, x + run.left, y + run.top, index, run.fg);
        }
    }
}
