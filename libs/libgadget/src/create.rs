//! Gadget construction from a base geometry record and a tag list.
//!
//! Tags are collected first and applied afterwards, so their order in the
//! list does not matter.

use alloc::string::String;
use alloc::vec::Vec;

use libraster::Pen;

use crate::gadget::{
    Activation, CheckboxInfo, Gadget, GadgetFlags, GadgetKind, Kind, ListInfo, MxInfo, NewGadget,
    TextInfo,
};
use crate::strinfo::{self, StringInfo};
use crate::tags::{self, Align, Tag};
use crate::theme::Theme;
use crate::widget::checkbox::{CHECKBOX_HEIGHT, CHECKBOX_WIDTH};
use crate::widget::mx::{DEFAULT_SPACING, MX_HEIGHT, MX_WIDTH};

#[derive(Default)]
struct Construction<'a> {
    disabled: bool,
    immediate: bool,
    tab_cycle: Option<bool>,
    border: Option<bool>,
    recessed: bool,
    underscore: Option<u8>,
    align: Align,
    text_pen: Option<Pen>,
    string: Option<&'a str>,
    max_chars: Option<usize>,
    number: Option<i32>,
    labels: Option<&'a [&'a str]>,
    active: u16,
    scaled: bool,
    spacing: Option<i32>,
    checked: bool,
    text: Option<&'a str>,
    selected: Option<u16>,
}

impl<'a> Construction<'a> {
    fn from_tags(list: &[Tag<'a>]) -> Self {
        let mut c = Self::default();
        for tag in tags::iter(list) {
            match *tag {
                Tag::Disabled(v) => c.disabled = v,
                Tag::Immediate(v) => c.immediate = v,
                Tag::TabCycle(v) => c.tab_cycle = Some(v),
                Tag::Border(v) => c.border = Some(v),
                Tag::Recessed(v) => c.recessed = v,
                Tag::Underscore(marker) => c.underscore = Some(marker),
                Tag::Align(a) => c.align = a,
                Tag::TextPen(pen) => c.text_pen = Some(pen),
                Tag::String(s) => c.string = Some(s),
                Tag::MaxChars(n) => c.max_chars = Some(n),
                Tag::Number(n) => c.number = Some(n),
                Tag::Labels(l) => c.labels = Some(l),
                Tag::Active(a) => c.active = a,
                Tag::Scaled(v) => c.scaled = v,
                Tag::Spacing(s) => c.spacing = Some(s),
                Tag::Checked(v) => c.checked = v,
                Tag::Text(t) => c.text = Some(t),
                Tag::Selected(s) => c.selected = s,
                _ => {}
            }
        }
        c
    }
}

/// Copy option labels into owned storage. `None` if allocation fails.
pub(crate) fn copy_labels(labels: &[&str]) -> Option<Vec<String>> {
    let mut out = Vec::new();
    out.try_reserve_exact(labels.len()).ok()?;
    for label in labels {
        let mut s = String::new();
        s.try_reserve_exact(label.len()).ok()?;
        s.push_str(label);
        out.push(s);
    }
    Some(out)
}

fn string_info(c: &Construction<'_>, integer: bool) -> Option<StringInfo> {
    let (max, min_buffer) = if integer {
        (c.max_chars.unwrap_or(strinfo::DEFAULT_INTEGER_CHARS), strinfo::INTEGER_BUFFER)
    } else {
        (c.max_chars.unwrap_or(strinfo::DEFAULT_MAX_CHARS), 0)
    };
    let mut si = StringInfo::try_new(max, min_buffer)?;
    match (c.string, c.number) {
        (_, Some(n)) if integer => si.set_number(n),
        (Some(s), _) => {
            si.set_text(s);
            if integer {
                si.normalize_number();
            }
        }
        (None, Some(n)) => si.set_number(n),
        (None, None) if integer => si.set_number(0),
        (None, None) => {}
    }
    Some(si)
}

/// Build a gadget of `kind`. Sub-records whose allocation fails are left
/// absent and the gadget stays inert.
pub(crate) fn build(kind: Kind, ng: &NewGadget, list: &[Tag<'_>], theme: &Theme) -> Gadget {
    let c = Construction::from_tags(list);
    let text_entry = matches!(kind, Kind::String | Kind::Integer);

    let mut flags = GadgetFlags::empty();
    flags.set(GadgetFlags::DISABLED, c.disabled);
    flags.set(GadgetFlags::TAB_CYCLE, c.tab_cycle.unwrap_or(text_entry));
    flags.set(GadgetFlags::BORDER, c.border.unwrap_or(text_entry));
    flags.set(GadgetFlags::RECESSED, c.recessed);

    let mut activation = Activation::REL_VERIFY;
    activation.set(Activation::IMMEDIATE, c.immediate);

    let mut label = ng.label.clone();
    let underscore = match (c.underscore, label.as_mut()) {
        (Some(marker), Some(itext)) => itext.take_underscore(marker),
        _ => None,
    };
    let mut place = ng.place.unwrap_or_else(|| kind.default_place());
    let (mut width, mut height) = (ng.width, ng.height);

    let payload = match kind {
        Kind::Generic => GadgetKind::Generic,
        Kind::Button => GadgetKind::Button { align: c.align },
        Kind::Checkbox => {
            if !c.scaled {
                width = CHECKBOX_WIDTH;
                height = CHECKBOX_HEIGHT;
            }
            GadgetKind::Checkbox(CheckboxInfo { checked: c.checked })
        }
        Kind::String => GadgetKind::String(string_info(&c, false)),
        Kind::Integer => GadgetKind::Integer(string_info(&c, true)),
        Kind::Mx => {
            let (box_width, box_height) = if c.scaled {
                (ng.width.max(1), ng.height.max(1))
            } else {
                (MX_WIDTH, MX_HEIGHT)
            };
            let info = copy_labels(c.labels.unwrap_or(&[])).map(|labels| {
                let mut info = MxInfo {
                    labels,
                    active: 0,
                    displayed: 0,
                    box_width,
                    box_height,
                    spacing: c.spacing.unwrap_or(DEFAULT_SPACING).max(0),
                };
                info.active = info.clamp(c.active);
                info.displayed = info.active;
                info
            });
            width = box_width;
            height = info.as_ref().map_or(0, MxInfo::total_height);
            GadgetKind::Mx(info)
        }
        Kind::ListView => {
            let info = copy_labels(c.labels.unwrap_or(&[])).map(|labels| {
                let selected = c.selected.filter(|&i| usize::from(i) < labels.len());
                ListInfo {
                    labels,
                    selected,
                    displayed: selected,
                }
            });
            GadgetKind::ListView(info)
        }
        Kind::Text => {
            let mut info = TextInfo {
                pen: c.text_pen,
                ..TextInfo::default()
            };
            match c.text {
                Some(text) => info.set_text(text, theme.field_inset, height),
                // Without explicit contents the label runs are the contents.
                None => {
                    if let Some(mut runs) = label.take() {
                        if let (Some(pen), Some(first)) = (c.text_pen, runs.runs.first_mut()) {
                            first.fg = pen;
                        }
                        info.runs = runs;
                    }
                    place = crate::gadget::Place::In;
                }
            }
            GadgetKind::Text(info)
        }
    };

    match &payload {
        GadgetKind::String(None) | GadgetKind::Integer(None) | GadgetKind::Mx(None) | GadgetKind::ListView(None) => {
            log::warn!("create: {:?} extension unavailable; gadget is inert", kind);
        }
        _ => {}
    }

    Gadget {
        left: ng.left,
        top: ng.top,
        width,
        height,
        flags,
        activation,
        label,
        place,
        underscore,
        id: ng.id,
        user_data: ng.user_data,
        kind: payload,
    }
}
