//! Pointer tracking: which gadget is hovered, which is pressed, and the
//! transitions between the two.

use crate::gadget::GadgetId;
use crate::input::PointerState;

/// Pointer transition relative to the pressed gadget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Button went down over the gadget.
    InitialClick,
    /// Held, and the pointer left the pressed gadget.
    MovedAway,
    /// Held, and the pointer came back over the pressed gadget.
    MovedBack,
    /// Held, and the pointer moved within the pressed gadget.
    DragOver,
    /// Released over the pressed gadget.
    ReleaseOn,
    /// Released elsewhere.
    ReleaseOff,
}

/// Result of feeding one pointer sample to the tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseStep {
    pub transition: Option<(GadgetId, Transition)>,
    /// Left button went down over no gadget.
    pub pressed_nowhere: bool,
    /// Left button came up with no gadget pressed.
    pub released_nowhere: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MouseTracker {
    hovered: Option<GadgetId>,
    pressed: Option<GadgetId>,
    over_pressed: bool,
    left_down: bool,
    x: i32,
    y: i32,
}

impl MouseTracker {
    pub const fn new() -> Self {
        Self {
            hovered: None,
            pressed: None,
            over_pressed: false,
            left_down: false,
            x: 0,
            y: 0,
        }
    }

    pub fn hovered(&self) -> Option<GadgetId> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<GadgetId> {
        self.pressed
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Forget a gadget that no longer exists.
    pub fn forget(&mut self, id: GadgetId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.pressed == Some(id) {
            self.pressed = None;
            self.over_pressed = false;
        }
    }

    /// Feed a pointer sample. `hit` is the gadget under the pointer.
    pub fn update(&mut self, pointer: PointerState, hit: Option<GadgetId>) -> MouseStep {
        let was_down = self.left_down;
        let moved = (pointer.x, pointer.y) != (self.x, self.y);
        self.left_down = pointer.left;
        self.x = pointer.x;
        self.y = pointer.y;
        self.hovered = hit;

        let mut step = MouseStep::default();
        match (was_down, pointer.left) {
            (false, true) => match hit {
                Some(id) => {
                    self.pressed = Some(id);
                    self.over_pressed = true;
                    step.transition = Some((id, Transition::InitialClick));
                }
                None => step.pressed_nowhere = true,
            },
            (true, false) => match self.pressed.take() {
                Some(id) => {
                    self.over_pressed = false;
                    let t = if hit == Some(id) {
                        Transition::ReleaseOn
                    } else {
                        Transition::ReleaseOff
                    };
                    step.transition = Some((id, t));
                }
                None => step.released_nowhere = true,
            },
            (true, true) => {
                if let Some(id) = self.pressed {
                    let over = hit == Some(id);
                    let t = match (self.over_pressed, over) {
                        (true, false) => Some(Transition::MovedAway),
                        (false, true) => Some(Transition::MovedBack),
                        (true, true) if moved => Some(Transition::DragOver),
                        _ => None,
                    };
                    self.over_pressed = over;
                    step.transition = t.map(|t| (id, t));
                }
            }
            (false, false) => {}
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids() -> (GadgetId, GadgetId) {
        let mut map: SlotMap<GadgetId, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    fn at(x: i32, left: bool) -> PointerState {
        PointerState::new(x, 0, left)
    }

    #[test]
    fn six_transitions() {
        let (a, _) = ids();
        let mut t = MouseTracker::new();
        assert_eq!(t.update(at(1, false), Some(a)).transition, None);
        assert_eq!(t.update(at(1, true), Some(a)).transition, Some((a, Transition::InitialClick)));
        assert_eq!(t.update(at(2, true), Some(a)).transition, Some((a, Transition::DragOver)));
        assert_eq!(t.update(at(2, true), Some(a)).transition, None);
        assert_eq!(t.update(at(50, true), None).transition, Some((a, Transition::MovedAway)));
        assert_eq!(t.update(at(3, true), Some(a)).transition, Some((a, Transition::MovedBack)));
        assert_eq!(t.update(at(3, false), Some(a)).transition, Some((a, Transition::ReleaseOn)));
        assert_eq!(t.pressed(), None);

        t.update(at(3, true), Some(a));
        assert_eq!(t.update(at(50, false), None).transition, Some((a, Transition::ReleaseOff)));
    }

    #[test]
    fn other_gadget_under_pointer_counts_as_away() {
        let (a, b) = ids();
        let mut t = MouseTracker::new();
        t.update(at(1, true), Some(a));
        assert_eq!(t.update(at(9, true), Some(b)).transition, Some((a, Transition::MovedAway)));
        assert_eq!(t.hovered(), Some(b));
        assert_eq!(t.update(at(9, false), Some(b)).transition, Some((a, Transition::ReleaseOff)));
    }

    #[test]
    fn clicks_on_nothing_are_reported() {
        let mut t = MouseTracker::new();
        assert!(t.update(at(1, true), None).pressed_nowhere);
        assert!(t.update(at(1, false), None).released_nowhere);
    }

    #[test]
    fn forgotten_gadget_releases_nowhere() {
        let (a, _) = ids();
        let mut t = MouseTracker::new();
        t.update(at(1, true), Some(a));
        t.forget(a);
        assert!(t.update(at(1, false), None).released_nowhere);
    }
}
