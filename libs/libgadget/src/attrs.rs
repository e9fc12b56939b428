//! Attribute get/set on live gadgets.

use crate::create::copy_labels;
use crate::error::Error;
use crate::gadget::{Activation, GadgetFlags, GadgetId, GadgetKind};
use crate::input::Platform;
use crate::session::Session;
use crate::tags::{self, Tag};

/// Readable attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attr {
    Disabled,
    /// Client id number from the geometry record.
    Id,
    /// Text-entry contents.
    String,
    /// Text-entry contents parsed as decimal.
    Number,
    /// Committed radio option.
    Active,
    /// Radio option currently shown, which differs from `Active` mid-drag.
    Displayed,
    Checked,
    /// List-view selection; `None` if nothing is selected.
    Selected,
    /// Contents of a plain text gadget.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrValue<'s> {
    Bool(bool),
    Int(i32),
    Str(&'s str),
    None,
}

/// One slot of a [`Session::get_attrs`] request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrQuery<'s> {
    pub attr: Attr,
    /// Filled in if the gadget has the attribute, left alone otherwise.
    pub value: Option<AttrValue<'s>>,
}

impl<'s> AttrQuery<'s> {
    pub fn new(attr: Attr) -> Self {
        Self { attr, value: None }
    }
}

impl<P: Platform> Session<P> {
    /// Apply `tags` to a live gadget and redraw it. Tags the gadget's kind
    /// does not support are ignored.
    pub fn set_attrs(&mut self, id: GadgetId, list: &[Tag<'_>]) -> Result<(), Error> {
        let inset = self.theme.field_inset;
        let g = self.gadgets.get_mut(id).ok_or(Error::UnknownGadget)?;
        let mut lose_focus = false;
        for tag in tags::iter(list) {
            match (*tag, &mut g.kind) {
                (Tag::Disabled(v), _) => {
                    g.flags.set(GadgetFlags::DISABLED, v);
                    lose_focus |= v;
                }
                (Tag::TabCycle(v), _) => g.flags.set(GadgetFlags::TAB_CYCLE, v),
                (Tag::Immediate(v), _) => g.activation.set(Activation::IMMEDIATE, v),
                (Tag::String(s), GadgetKind::String(Some(si))) => si.set_text(s),
                (Tag::String(s), GadgetKind::Integer(Some(si))) => {
                    si.set_text(s);
                    si.normalize_number();
                }
                (Tag::Number(n), GadgetKind::String(Some(si)) | GadgetKind::Integer(Some(si))) => {
                    si.set_number(n)
                }
                (Tag::Active(a), GadgetKind::Mx(Some(info))) => {
                    info.active = info.clamp(a);
                    info.displayed = info.active;
                }
                (Tag::Labels(labels), GadgetKind::Mx(Some(info))) => {
                    if let Some(copy) = copy_labels(labels) {
                        info.labels = copy;
                        info.active = info.clamp(info.active);
                        info.displayed = info.active;
                        g.height = info.total_height();
                    }
                }
                (Tag::Labels(labels), GadgetKind::ListView(Some(info))) => {
                    if let Some(copy) = copy_labels(labels) {
                        info.labels = copy;
                        info.selected = None;
                        info.displayed = None;
                    }
                }
                (Tag::Selected(sel), GadgetKind::ListView(Some(info))) => {
                    info.selected = sel.filter(|&i| usize::from(i) < info.labels.len());
                    info.displayed = info.selected;
                }
                (Tag::Checked(v), GadgetKind::Checkbox(info)) => info.checked = v,
                (Tag::Text(t), GadgetKind::Text(info)) => info.set_text(t, inset, g.height),
                (Tag::TextPen(pen), GadgetKind::Text(info)) => {
                    info.pen = Some(pen);
                    if let Some(run) = info.runs.runs.first_mut() {
                        run.fg = pen;
                    }
                }
                _ => {}
            }
        }
        if lose_focus && self.focus == Some(id) {
            self.deactivate_gadget();
        }
        self.render_gadget(id);
        Ok(())
    }

    /// Current value of one attribute; `None` if the kind lacks it.
    pub fn get_attr(&self, id: GadgetId, attr: Attr) -> Result<Option<AttrValue<'_>>, Error> {
        let g = self.gadgets.get(id).ok_or(Error::UnknownGadget)?;
        let value = match (attr, &g.kind) {
            (Attr::Disabled, _) => AttrValue::Bool(g.is_disabled()),
            (Attr::Id, _) => AttrValue::Int(i32::from(g.id)),
            (Attr::String, GadgetKind::String(Some(si)) | GadgetKind::Integer(Some(si))) => {
                AttrValue::Str(si.text())
            }
            (Attr::Number, GadgetKind::String(Some(si)) | GadgetKind::Integer(Some(si))) => {
                AttrValue::Int(si.number())
            }
            (Attr::Active, GadgetKind::Mx(Some(info))) => AttrValue::Int(i32::from(info.active)),
            (Attr::Displayed, GadgetKind::Mx(Some(info))) => {
                AttrValue::Int(i32::from(info.displayed))
            }
            (Attr::Checked, GadgetKind::Checkbox(info)) => AttrValue::Bool(info.checked),
            (Attr::Selected, GadgetKind::ListView(Some(info))) => match info.selected {
                Some(i) => AttrValue::Int(i32::from(i)),
                None => AttrValue::None,
            },
            (Attr::Text, GadgetKind::Text(info)) => AttrValue::Str(info.runs.first_text()),
            _ => return Ok(None),
        };
        Ok(Some(value))
    }

    /// Fill each query the gadget can answer. Returns how many were filled.
    pub fn get_attrs<'s>(&'s self, id: GadgetId, queries: &mut [AttrQuery<'s>]) -> Result<usize, Error> {
        let mut filled = 0;
        for query in queries.iter_mut() {
            if let Some(value) = self.get_attr(id, query.attr)? {
                query.value = Some(value);
                filled += 1;
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gadget::{Kind, NewGadget};
    use crate::testing::{session, Script};

    #[test]
    fn integer_number_formats_both_ways() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        let id = s
            .create_gadget(Kind::Integer, Some(ctx), &NewGadget::new(0, 0, 80, 14), &[Tag::Number(-17)])
            .unwrap();
        assert_eq!(s.get_attr(id, Attr::String), Ok(Some(AttrValue::Str("-17"))));
        s.set_attrs(id, &[Tag::String("  9")]).unwrap();
        assert_eq!(s.get_attr(id, Attr::Number), Ok(Some(AttrValue::Int(0))));
        s.set_attrs(id, &[Tag::Number(250)]).unwrap();
        assert_eq!(s.get_attr(id, Attr::Number), Ok(Some(AttrValue::Int(250))));
    }

    #[test]
    fn queries_for_missing_attributes_are_untouched() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        let labels = ["a", "b", "c"];
        let id = s
            .create_gadget(Kind::Mx, Some(ctx), &NewGadget::new(0, 0, 0, 0), &[Tag::Labels(&labels)])
            .unwrap();
        s.set_attrs(id, &[Tag::Active(1), Tag::Checked(true)]).unwrap();
        let mut queries = [
            AttrQuery::new(Attr::Active),
            AttrQuery {
                attr: Attr::Checked,
                value: Some(AttrValue::Bool(false)),
            },
            AttrQuery::new(Attr::Displayed),
        ];
        assert_eq!(s.get_attrs(id, &mut queries), Ok(2));
        assert_eq!(queries[0].value, Some(AttrValue::Int(1)));
        assert_eq!(queries[1].value, Some(AttrValue::Bool(false)));
        assert_eq!(queries[2].value, Some(AttrValue::Int(1)));
    }

    #[test]
    fn disabling_the_focused_field_drops_focus() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        let id = s
            .create_gadget(Kind::String, Some(ctx), &NewGadget::new(0, 0, 80, 14), &[])
            .unwrap();
        s.activate_gadget(id);
        s.set_attrs(id, &[Tag::Disabled(true)]).unwrap();
        assert_eq!(s.active_gadget(), None);
        assert_eq!(s.get_attr(id, Attr::Disabled), Ok(Some(AttrValue::Bool(true))));
    }

    #[test]
    fn unknown_gadget_is_an_error() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        s.free_gadgets(ctx).unwrap();
        assert_eq!(s.set_attrs(ctx, &[]), Err(Error::UnknownGadget));
        assert_eq!(s.get_attr(ctx, Attr::Id), Err(Error::UnknownGadget));
    }

    #[test]
    fn set_attrs_redraws_synchronously() {
        let mut s = session(Script::default());
        let ctx = s.create_context();
        let id = s
            .create_gadget(Kind::Checkbox, Some(ctx), &NewGadget::new(20, 20, 0, 0), &[])
            .unwrap();
        s.refresh_gadgets(ctx).unwrap();
        let before = s.rastport().bitmap().clone();
        s.set_attrs(id, &[Tag::Checked(true)]).unwrap();
        assert!(!s.rastport().bitmap().same_pixels(&before));
    }
}
