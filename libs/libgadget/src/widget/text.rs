use libraster::RastPort;

use crate::gadget::{Gadget, GadgetFlags, GadgetKind};
use crate::text;
use crate::theme::Theme;
use crate::widget;

/// Label runs positioned inside the box, optionally framed by a ridge.
pub fn render(rp: &mut RastPort, theme: &Theme, g: &Gadget) {
    let rect = g.rect();
    if g.flags.contains(GadgetFlags::BORDER) {
        widget::ridge(rp, theme, &rect);
    }
    widget::draw_label(rp, theme, g, None);
    if let GadgetKind::Text(info) = &g.kind {
        text::draw_runs(rp, &info.runs, rect.x, rect.y);
    }
}
