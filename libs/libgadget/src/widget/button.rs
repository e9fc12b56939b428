use libraster::RastPort;

use crate::gadget::{Gadget, GadgetFlags, GadgetKind, Place};
use crate::layout;
use crate::mouse::Transition;
use crate::tags::Align;
use crate::text;
use crate::theme::Theme;
use crate::widget::{self, Reaction};

/// Bevelled box with its label inside; filled while pressed.
pub fn render(rp: &mut RastPort, theme: &Theme, g: &Gadget) {
    let rect = g.rect();
    let pressed = g.flags.contains(GadgetFlags::SELECTED);
    if pressed && rect.w > 2 && rect.h > 2 {
        let (x1, y1, x2, y2) = rect.inset(1).corners();
        rp.rect_fill(theme.fill, x1, y1, x2, y2);
    }
    widget::frame(rp, theme, g);

    let pen = if pressed { theme.fill_text } else { theme.text };
    let align = match g.kind {
        GadgetKind::Button { align } => align,
        _ => Align::Center,
    };
    match (&g.label, g.place) {
        (Some(label), Place::In) if label.runs.len() == 1 && align != Align::Center => {
            let bytes = label.first_text().as_bytes();
            let w = text::text_width(bytes);
            let h = text::text_height();
            let at = match align {
                Align::Left => layout::align_left(&rect, w, h, theme.field_inset),
                _ => layout::align_right(&rect, w, h, theme.field_inset),
            };
            text::draw_text(rp, bytes, at.x, at.y, pen, None);
            if let Some(index) = g.underscore {
                text::underline(rp, at.x, at.y, index, pen);
            }
        }
        _ => widget::draw_label(rp, theme, g, Some(pen)),
    }
}

/// Pressed look follows the pointer; releasing on the button commits.
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
            Reaction::commit(0)
        }
        Transition::DragOver => Reaction::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::IntuiText;
    use libraster::{Backend, BitMap};

    fn button() -> Gadget {
        Gadget {
            left: 8,
            top: 8,
            width: 48,
            height: 14,
            label: Some(IntuiText::new("OK")),
            kind: GadgetKind::Button { align: Align::Center },
            ..Gadget::context()
        }
    }

    #[test]
    fn press_drag_off_release_does_not_commit() {
        let mut g = button();
        assert!(!react(&mut g, Transition::InitialClick).up.is_some());
        assert!(g.flags.contains(GadgetFlags::SELECTED));
        react(&mut g, Transition::MovedAway);
        assert!(!g.flags.contains(GadgetFlags::SELECTED));
        assert_eq!(react(&mut g, Transition::ReleaseOff).up, None);
    }

    #[test]
    fn release_on_commits() {
        let mut g = button();
        react(&mut g, Transition::InitialClick);
        assert_eq!(react(&mut g, Transition::ReleaseOn).up, Some(0));
        assert!(!g.flags.contains(GadgetFlags::SELECTED));
    }

    #[test]
    fn pressed_button_fills_interior() {
        let theme = Theme::workbench();
        let mut rp = RastPort::new(BitMap::new(64, 32, 2), Backend::Cpu);
        let mut g = button();
        render(&mut rp, &theme, &g);
        assert_eq!(rp.bitmap().pixel(8, 8), theme.shine);
        assert_eq!(rp.bitmap().pixel(55, 21), theme.shadow);
        assert_eq!(rp.bitmap().pixel(10, 10), theme.background);

        g.flags.insert(GadgetFlags::SELECTED);
        render(&mut rp, &theme, &g);
        assert_eq!(rp.bitmap().pixel(8, 8), theme.shadow);
        assert_eq!(rp.bitmap().pixel(10, 10), theme.fill);
    }
}
