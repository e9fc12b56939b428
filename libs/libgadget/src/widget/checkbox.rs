use libraster::RastPort;

use crate::gadget::{Gadget, GadgetFlags, GadgetKind};
use crate::mouse::Transition;
use crate::theme::Theme;
use crate::widget::{self, Reaction};

/// Unscaled checkbox size.
pub const CHECKBOX_WIDTH: i32 = 26;
pub const CHECKBOX_HEIGHT: i32 = 11;

fn checked(g: &Gadget) -> bool {
    matches!(g.kind, GadgetKind::Checkbox(info) if info.checked)
}

pub fn render(rp: &mut RastPort, theme: &Theme, g: &Gadget) {
    let rect = g.rect();
    widget::frame(rp, theme, g);

    if checked(g) && rect.w > 6 && rect.h > 6 {
        // Checkmark: two lines forming a check shape
        let (x1, y1, x2, y2) = rect.inset(2).corners();
        let mid_x = x1 + (x2 - x1) / 3;
        let mid_y = y2;
        let start_y = y1 + (y2 - y1) / 2;
        rp.line(theme.text, x1 + 1, start_y, mid_x, mid_y);
        rp.line(theme.text, mid_x, mid_y, x2 - 1, y1);
        rp.line(theme.text, x1 + 2, start_y, mid_x + 1, mid_y);
        rp.line(theme.text, mid_x + 1, mid_y, x2, y1);
    }

    widget::draw_label(rp, theme, g, None);
}

/// Toggles when released on the box; the GadgetUp code is the new state.
pub fn react(g: &mut Gadget, transition: Transition) -> Reaction {
    match transition {
        Transition::InitialClick | Transition::MovedBack => {
            g.flags.insert(GadgetFlags::SELECTED);
            Reaction::redraw()
        }
        Transition::MovedAway | Transition::ReleaseOff => {
            g.flags.remove(GadgetFlags::SELECTED);
            Reaction::redraw()
        }
        Transition::ReleaseOn => {
            g.flags.remove(GadgetFlags::SELECTED);
            match &mut g.kind {
                GadgetKind::Checkbox(info) => {
                    info.checked = !info.checked;
                    Reaction::commit(u16::from(info.checked))
                }
                _ => Reaction::default(),
            }
        }
        Transition::DragOver => Reaction::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gadget::CheckboxInfo;

    fn checkbox() -> Gadget {
        Gadget {
            left: 0,
            top: 0,
            width: CHECKBOX_WIDTH,
            height: CHECKBOX_HEIGHT,
            kind: GadgetKind::Checkbox(CheckboxInfo::default()),
            ..Gadget::context()
        }
    }

    #[test]
    fn toggles_on_release_only() {
        let mut g = checkbox();
        react(&mut g, Transition::InitialClick);
        assert!(!checked(&g));
        assert_eq!(react(&mut g, Transition::ReleaseOn).up, Some(1));
        assert!(checked(&g));
        react(&mut g, Transition::InitialClick);
        assert_eq!(react(&mut g, Transition::ReleaseOff).up, None);
        assert!(checked(&g));
        react(&mut g, Transition::InitialClick);
        assert_eq!(react(&mut g, Transition::ReleaseOn).up, Some(0));
    }
}
