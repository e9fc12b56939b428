//! Keyboard routing: qualifiers, focused text fields, tab traversal and
//! the key events nobody consumed.

use crate::editor::{self, EditKey, EscState};
use crate::event::Class;
use crate::gadget::{GadgetId, GadgetKind};
use crate::input::{Platform, Symbol};
use crate::qualifier::rawkey;
use crate::session::Session;
use crate::strinfo::{CharFilter, EditOutcome};

impl<P: Platform> Session<P> {
    pub(crate) fn handle_symbol(&mut self, symbol: Symbol) {
        #[cfg(feature = "trace-input")]
        log::trace!("keyboard: {:?} qualifier {:?}", symbol, self.qualifier);
        match symbol {
            Symbol::Char(ch) => self.handle_char(ch),
            Symbol::RawKey { code, up } => self.handle_raw_key(code, up),
        }
    }

    fn handle_raw_key(&mut self, code: u8, up: bool) {
        let modifier = self.qualifier.update(code, up);
        if !modifier && !up {
            if let Some(id) = self.text_focus() {
                let shift = self.qualifier.shift();
                let key = match code {
                    rawkey::CURSOR_LEFT if shift => Some(EditKey::LineBegin),
                    rawkey::CURSOR_LEFT => Some(EditKey::Left),
                    rawkey::CURSOR_RIGHT if shift => Some(EditKey::LineEnd),
                    rawkey::CURSOR_RIGHT => Some(EditKey::Right),
                    _ => None,
                };
                if let Some(key) = key {
                    self.edit(id, key);
                    return;
                }
            }
        }
        let code = u16::from(code) | if up { u16::from(rawkey::UP_BIT) } else { 0 };
        self.push(Class::RawKey, code, None);
    }

    fn handle_char(&mut self, ch: u8) {
        // Escape sequence bytes pass through untouched while control is held.
        let ch = if self.qualifier.ctrl() && self.decoder.state() == EscState::Normal {
            editor::control_code(ch)
        } else {
            ch
        };
        if let Some(id) = self.text_focus() {
            if let Some(mut key) = self.decoder.feed(ch) {
                if key == EditKey::Tab && self.qualifier.shift() {
                    key = EditKey::BackTab;
                }
                self.edit(id, key);
            }
            return;
        }
        if ch == editor::TAB && self.decoder.state() == EscState::Normal {
            let forward = !self.qualifier.shift();
            let start = self.focus;
            if self.cycle_from(start, forward).is_some() {
                return;
            }
        }
        self.push(Class::VanillaKey, u16::from(ch), None);
    }

    /// Apply one editing key to the focused field and act on the outcome.
    fn edit(&mut self, id: GadgetId, key: EditKey) {
        let Some(g) = self.gadgets.get_mut(id) else {
            return;
        };
        let filter = match g.kind {
            GadgetKind::Integer(_) => CharFilter::Integer,
            _ => CharFilter::Any,
        };
        let Some(si) = g.kind.string_info_mut() else {
            return;
        };
        let outcome = si.apply(key, filter);
        self.cursor_on = true;
        match outcome {
            EditOutcome::Unchanged => {}
            EditOutcome::Changed => self.render_gadget(id),
            EditOutcome::Beep => self.platform.beep(),
            EditOutcome::Done(code) => {
                self.deactivate_gadget();
                self.push(Class::GadgetUp, u16::from(code), Some(id));
            }
            EditOutcome::Next | EditOutcome::Prev => {
                self.deactivate_gadget();
                self.push(Class::GadgetUp, u16::from(editor::TAB), Some(id));
                self.cycle_from(Some(id), outcome == EditOutcome::Next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::{CR, CTRL_A, CTRL_K, ESC, TAB};
    use crate::event::Class;
    use crate::gadget::{GadgetId, Kind, NewGadget};
    use crate::qualifier::rawkey;
    use crate::tags::Tag;
    use crate::testing::{session, Script};
    use crate::Session;

    fn with_field(script: Script, tags: &[Tag]) -> (Session<Script>, GadgetId) {
        let mut s = session(script);
        let ctx = s.create_context();
        let id = s
            .create_gadget(Kind::String, Some(ctx), &NewGadget::new(80, 10, 120, 14).id(3), tags)
            .unwrap();
        s.activate_gadget(id);
        (s, id)
    }

    #[test]
    fn typed_text_round_trips_through_erase() {
        let mut script = Script::default();
        script.chars(b"abc");
        let (mut s, id) = with_field(script, &[]);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().text(), "abc");
        assert_eq!(s.string_info(id).unwrap().cursor(), 3);
        s.platform_mut().chars(&[CTRL_A, CTRL_K]);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().text(), "");
        assert_eq!(s.pending_events(), 0);
    }

    #[test]
    fn control_qualifier_maps_letters() {
        let mut script = Script::default();
        script
            .chars(b"xy")
            .raw(rawkey::CONTROL, false)
            .chars(b"a")
            .raw(rawkey::CONTROL, true)
            .chars(b"z");
        let (mut s, id) = with_field(script, &[]);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().text(), "zxy");
    }

    #[test]
    fn overflow_beeps() {
        let mut script = Script::default();
        script.chars(b"abcd");
        let (mut s, id) = with_field(script, &[Tag::MaxChars(3)]);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().text(), "abc");
        assert_eq!(s.platform().beeps, 1);
    }

    #[test]
    fn return_ends_editing_with_gadget_up() {
        let mut script = Script::default();
        script.chars(b"ok").chars(&[CR]);
        let (mut s, id) = with_field(script, &[]);
        s.poll();
        assert_eq!(s.active_gadget(), None);
        let ev = s.get_event().unwrap();
        assert_eq!((ev.class, ev.code, ev.gadget, ev.gadget_id), (Class::GadgetUp, 0x0D, Some(id), 3));
    }

    #[test]
    fn tab_moves_between_fields() {
        let mut script = Script::default();
        script.chars(&[TAB]);
        let (mut s, first) = with_field(script, &[]);
        let second = s
            .create_gadget(Kind::Integer, Some(first), &NewGadget::new(80, 30, 120, 14), &[])
            .unwrap();
        s.poll();
        assert_eq!(s.active_gadget(), Some(second));
        let ev = s.get_event().unwrap();
        assert_eq!((ev.class, ev.code), (Class::GadgetUp, u16::from(TAB)));

        s.platform_mut().raw(rawkey::LEFT_SHIFT, false).chars(&[TAB]);
        s.poll();
        assert_eq!(s.active_gadget(), Some(first));
    }

    #[test]
    fn escape_arrows_and_raw_arrows_agree() {
        let mut script = Script::default();
        script.chars(b"abc").chars(&[ESC, b'[', b'D']).raw(rawkey::CURSOR_LEFT, false);
        let (mut s, id) = with_field(script, &[]);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().cursor(), 1);
        s.platform_mut().chars(b"\x1b[1;5C");
        s.poll();
        assert_eq!(s.string_info(id).unwrap().cursor(), 3);
    }

    #[test]
    fn held_control_does_not_break_escape_sequences() {
        let mut script = Script::default();
        script
            .chars(b"abcd")
            .chars(&[CTRL_A])
            .raw(rawkey::CONTROL, false)
            .chars(&[ESC, b'[', b'C'])
            .raw(rawkey::CONTROL, true)
            .chars(b"X");
        let (mut s, id) = with_field(script, &[]);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().text(), "aXbcd");
    }

    #[test]
    fn integer_fields_filter_and_normalize() {
        let mut script = Script::default();
        script.chars(b"0x42").chars(&[CR]);
        let mut s = session(script);
        let ctx = s.create_context();
        let id = s
            .create_gadget(Kind::Integer, Some(ctx), &NewGadget::new(0, 0, 80, 14), &[Tag::String("")])
            .unwrap();
        s.activate_gadget(id);
        s.poll();
        assert_eq!(s.string_info(id).unwrap().text(), "42");
        assert_eq!(s.platform().beeps, 1);
    }

    #[test]
    fn unfocused_keys_become_events() {
        let mut script = Script::default();
        script.chars(b"q").raw(0x45, false).raw(0x45, true);
        let mut s = session(script);
        s.poll();
        let codes: Vec<_> = core::iter::from_fn(|| s.get_event().map(|e| (e.class, e.code))).collect();
        assert_eq!(
            codes,
            [(Class::VanillaKey, u16::from(b'q')), (Class::RawKey, 0x45), (Class::RawKey, 0xC5)]
        );
    }
}
