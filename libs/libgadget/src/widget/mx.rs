//! Mutually exclusive option group.
//!
//! The displayed option tracks the pointer while the button is held; the
//! committed option changes only on release over the group.

use libraster::RastPort;

use crate::gadget::{Gadget, GadgetKind, MxInfo};
use crate::layout;
use crate::mouse::Transition;
use crate::rect::Rect;
use crate::text;
use crate::theme::Theme;
use crate::widget::Reaction;

/// Unscaled option box size.
pub const MX_WIDTH: i32 = 17;
pub const MX_HEIGHT: i32 = 9;
pub const DEFAULT_SPACING: i32 = 1;

fn column(g: &Gadget, info: &MxInfo) -> Rect {
    Rect::new(g.left, g.top, info.box_width, info.total_height())
}

/// Option under pixel row `y`.
pub fn option_at(g: &Gadget, info: &MxInfo, y: i32) -> u16 {
    let col = column(g, info);
    layout::v_stack_index(&col, info.box_height, info.count(), info.spacing, y) as u16
}

pub fn render(rp: &mut RastPort, theme: &Theme, g: &Gadget) {
    let GadgetKind::Mx(Some(info)) = &g.kind else {
        return;
    };
    let boxes = layout::v_stack(&column(g, info), info.box_height, info.count(), info.spacing);
    for (i, (b, label)) in boxes.iter().zip(&info.labels).enumerate() {
        let (x1, y1, x2, y2) = b.corners();
        rp.rect_outline(theme.text, x1, y1, x2, y2);
        let inner = if b.w > 4 && b.h > 4 { b.inset(2) } else { b.inset(1) };
        if !inner.is_empty() {
            let pen = if i == usize::from(info.displayed) {
                theme.fill
            } else {
                theme.background
            };
            let (ix1, iy1, ix2, iy2) = inner.corners();
            rp.rect_fill(pen, ix1, iy1, ix2, iy2);
        }
        let ty = b.y + (b.h - text::text_height()) / 2;
        text::draw_text(
            rp,
            label.as_bytes(),
            b.right() + theme.label_gap,
            ty,
            theme.text,
            Some(theme.background),
        );
    }
}

pub fn react(g: &mut Gadget, transition: Transition, y: i32) -> Reaction {
    let under = match &g.kind {
        GadgetKind::Mx(Some(info)) if info.count() > 0 => option_at(g, info, y),
        _ => return Reaction::default(),
    };
    let GadgetKind::Mx(Some(info)) = &mut g.kind else {
        return Reaction::default();
    };
    let before = info.displayed;
    match transition {
        Transition::InitialClick | Transition::MovedBack | Transition::DragOver => {
            info.displayed = under;
        }
        Transition::MovedAway | Transition::ReleaseOff => info.displayed = info.active,
        Transition::ReleaseOn => {
            info.displayed = under;
            info.active = under;
            log::debug!("mx: committed option {}", under);
            return Reaction::commit(under);
        }
    }
    Reaction {
        redraw: info.displayed != before,
        down_code: info.displayed,
        ..Reaction::default()
    }
}
