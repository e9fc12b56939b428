//! Keyboard focus and tab-cycle traversal.

use crate::gadget::{Gadget, GadgetFlags, GadgetId, GadgetKind};
use crate::input::Platform;
use crate::session::Session;

impl<P: Platform> Session<P> {
    pub fn active_gadget(&self) -> Option<GadgetId> {
        self.focus
    }

    /// Focused gadget, if it takes text.
    pub(crate) fn text_focus(&self) -> Option<GadgetId> {
        self.focus
            .filter(|&id| self.gadgets.get(id).is_some_and(|g| g.kind.is_text_entry()))
    }

    /// Give `id` keyboard focus, taking it from whoever had it. Disabled
    /// gadgets and list heads refuse.
    pub fn activate_gadget(&mut self, id: GadgetId) -> bool {
        let eligible = self
            .gadgets
            .get(id)
            .is_some_and(|g| !g.is_disabled() && g.kind.kind().is_some());
        if !eligible {
            return false;
        }
        if self.focus == Some(id) {
            return true;
        }
        self.deactivate_gadget();
        if let Some(g) = self.gadgets.get_mut(id) {
            g.flags.insert(GadgetFlags::ACTIVE);
        }
        self.focus = Some(id);
        self.decoder.reset();
        self.cursor_on = true;
        self.render_gadget(id);
        log::debug!("focus: activated gadget {}", self.gadgets.get(id).map_or(0, |g| g.id));
        true
    }

    /// Drop keyboard focus. Integer fields are rewritten in canonical form.
    pub fn deactivate_gadget(&mut self) -> Option<GadgetId> {
        let id = self.focus.take()?;
        if let Some(g) = self.gadgets.get_mut(id) {
            g.flags.remove(GadgetFlags::ACTIVE);
            if let GadgetKind::Integer(Some(si)) = &mut g.kind {
                si.normalize_number();
            }
        }
        self.decoder.reset();
        self.render_gadget(id);
        Some(id)
    }

    /// Move focus to the next (or previous) tab-cycle gadget, wrapping
    /// around the list. Starts from the list head when nothing is focused.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<GadgetId> {
        self.cycle_from(self.focus, forward)
    }

    pub(crate) fn cycle_from(&mut self, start: Option<GadgetId>, forward: bool) -> Option<GadgetId> {
        if self.lists.is_empty() {
            return None;
        }
        let (list, start_pos) = start.and_then(|id| self.locate(id)).unwrap_or((0, 0));
        let len = self.lists[list].order.len();
        let mut pos = start_pos;
        for _ in 0..self.config.max_tab_hops {
            pos = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
            let id = self.lists[list].order[pos];
            if self.gadgets.get(id).is_some_and(Gadget::tab_eligible) {
                self.activate_gadget(id);
                return Some(id);
            }
            if pos == start_pos {
                return None;
            }
        }
        log::warn!(
            "focus: no tab-cycle gadget within {} hops",
            self.config.max_tab_hops
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::gadget::{GadgetId, Kind, NewGadget};
    use crate::tags::Tag;
    use crate::testing::{session, Script};

    fn fields(s: &mut crate::Session<Script>, n: i32) -> Vec<GadgetId> {
        let ctx = s.create_context();
        let mut prev = Some(ctx);
        let mut ids = Vec::new();
        for i in 0..n {
            prev = s.create_gadget(Kind::String, prev, &NewGadget::new(100, i * 16, 80, 14), &[]);
            ids.push(prev.unwrap());
            // Interleave gadgets that are not in the cycle.
            prev = s.create_gadget(Kind::Button, prev, &NewGadget::new(200, i * 16, 40, 14), &[]);
        }
        ids
    }

    #[test]
    fn forward_cycle_is_total() {
        let mut s = session(Script::default());
        let ids = fields(&mut s, 4);
        assert!(s.activate_gadget(ids[1]));
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(s.cycle_focus(true).unwrap());
        }
        assert_eq!(seen, [ids[2], ids[3], ids[0], ids[1]]);
    }

    #[test]
    fn backward_cycle_is_total() {
        let mut s = session(Script::default());
        let ids = fields(&mut s, 3);
        s.activate_gadget(ids[0]);
        let seen: Vec<_> = (0..3).map(|_| s.cycle_focus(false).unwrap()).collect();
        assert_eq!(seen, [ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn disabled_and_unflagged_gadgets_are_skipped() {
        let mut s = session(Script::default());
        let ids = fields(&mut s, 3);
        s.set_attrs(ids[1], &[Tag::Disabled(true)]).unwrap();
        s.activate_gadget(ids[0]);
        assert_eq!(s.cycle_focus(true), Some(ids[2]));
        assert_eq!(s.cycle_focus(true), Some(ids[0]));
        assert!(!s.activate_gadget(ids[1]));
    }

    #[test]
    fn tab_with_no_focus_enters_the_cycle() {
        let mut s = session(Script::default());
        let ids = fields(&mut s, 2);
        assert_eq!(s.cycle_focus(true), Some(ids[0]));
        s.deactivate_gadget();
        assert_eq!(s.cycle_focus(false), Some(ids[1]));
    }

    #[test]
    fn nothing_eligible_yields_none() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        s.create_gadget(Kind::Button, Some(ctx), &NewGadget::new(0, 0, 10, 10), &[]);
        assert_eq!(s.cycle_focus(true), None);
        assert_eq!(s.active_gadget(), None);
    }

    #[test]
    fn hop_limit_bounds_traversal() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        let mut prev = Some(ctx);
        for i in 0..120 {
            prev = s.create_gadget(Kind::Button, prev, &NewGadget::new(0, i, 1, 1), &[]);
        }
        s.create_gadget(Kind::String, prev, &NewGadget::new(0, 200, 10, 10), &[]);
        assert_eq!(s.cycle_focus(true), None);
        assert!(s.cycle_focus(false).is_some());
    }

    #[test]
    fn only_one_gadget_is_active() {
        let mut s = session(Script::default());
        let ids = fields(&mut s, 2);
        s.activate_gadget(ids[0]);
        s.activate_gadget(ids[1]);
        assert!(!s.gadget(ids[0]).unwrap().is_active());
        assert!(s.gadget(ids[1]).unwrap().is_active());
    }
}
