//! The gadget object model.
//!
//! Every gadget shares the same header (geometry, flags, label, id) and
//! carries a kind-specific extension in [`GadgetKind`].

use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;
use libraster::Pen;
use slotmap::new_key_type;

use crate::rect::Rect;
use crate::strinfo::StringInfo;
use crate::tags::Align;
use crate::text::{IntuiText, TextRun};

new_key_type! {
    /// Handle to a gadget in a session. Stale handles simply stop resolving.
    pub struct GadgetId;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GadgetFlags: u16 {
        const DISABLED = 1 << 0;
        /// Part of the tab-cycle focus ring.
        const TAB_CYCLE = 1 << 1;
        const BORDER = 1 << 2;
        /// Drawn pressed.
        const SELECTED = 1 << 3;
        const RECESSED = 1 << 4;
        /// Holds keyboard focus.
        const ACTIVE = 1 << 5;
    }
}

bitflags! {
    /// When a gadget reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Activation: u16 {
        /// GadgetDown on the initial click.
        const IMMEDIATE = 1 << 0;
        /// GadgetUp only when released over the gadget.
        const REL_VERIFY = 1 << 1;
    }
}

/// Gadget kinds a client can create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Generic,
    Button,
    Checkbox,
    Integer,
    ListView,
    Mx,
    String,
    Text,
}

/// Where a label goes relative to its gadget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Place {
    Left,
    Right,
    Above,
    In,
}

impl Kind {
    pub fn default_place(self) -> Place {
        match self {
            Kind::Button | Kind::Generic => Place::In,
            Kind::Mx => Place::Right,
            Kind::ListView => Place::Above,
            _ => Place::Left,
        }
    }
}

/// Base geometry record for gadget construction.
#[derive(Clone, Debug, Default)]
pub struct NewGadget {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub label: Option<IntuiText>,
    /// `None` picks the kind's default.
    pub place: Option<Place>,
    pub id: u16,
    pub user_data: usize,
}

impl NewGadget {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn label(mut self, text: &str) -> Self {
        self.label = Some(IntuiText::new(text));
        self
    }

    pub fn itext(mut self, itext: IntuiText) -> Self {
        self.label = Some(itext);
        self
    }

    pub fn place(mut self, place: Place) -> Self {
        self.place = Some(place);
        self
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn user_data(mut self, data: usize) -> Self {
        self.user_data = data;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckboxInfo {
    pub checked: bool,
}

/// Radio-group state. `active` is what the client sees; `displayed`
/// follows the pointer during a drag and only becomes `active` on release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MxInfo {
    pub labels: Vec<String>,
    pub active: u16,
    pub displayed: u16,
    pub box_width: i32,
    pub box_height: i32,
    pub spacing: i32,
}

impl MxInfo {
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    pub fn pitch(&self) -> i32 {
        self.box_height + self.spacing
    }

    /// Column height covering every option.
    pub fn total_height(&self) -> i32 {
        self.pitch() * self.count() as i32
    }

    /// Clamp an option index into range.
    pub fn clamp(&self, index: u16) -> u16 {
        index.min(self.count().saturating_sub(1) as u16)
    }
}

/// List-view state; rows commit on release like radio options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListInfo {
    pub labels: Vec<String>,
    pub selected: Option<u16>,
    pub displayed: Option<u16>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInfo {
    pub runs: IntuiText,
    pub pen: Option<Pen>,
}

impl TextInfo {
    /// Replace the text of the first run, creating it if needed.
    pub fn set_text(&mut self, text: &str, inset: i32, height: i32) {
        match self.runs.runs.first_mut() {
            Some(run) => {
                run.text.clear();
                run.text.push_str(text);
            }
            None => {
                let mut run = TextRun::new(text);
                run.left = inset;
                run.top = (height - 8).max(0) / 2;
                self.runs.runs.push(run);
            }
        }
        if let (Some(pen), Some(run)) = (self.pen, self.runs.runs.first_mut()) {
            run.fg = pen;
        }
    }
}

/// Kind-specific state. An `Option` extension is `None` when its
/// allocation failed; the gadget then renders inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GadgetKind {
    /// Zero-size list head.
    Context,
    Generic,
    Button { align: Align },
    Checkbox(CheckboxInfo),
    Integer(Option<StringInfo>),
    ListView(Option<ListInfo>),
    Mx(Option<MxInfo>),
    String(Option<StringInfo>),
    Text(TextInfo),
}

impl GadgetKind {
    /// Client-facing kind; `None` for a context head.
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            GadgetKind::Context => return None,
            GadgetKind::Generic => Kind::Generic,
            GadgetKind::Button { .. } => Kind::Button,
            GadgetKind::Checkbox(_) => Kind::Checkbox,
            GadgetKind::Integer(_) => Kind::Integer,
            GadgetKind::ListView(_) => Kind::ListView,
            GadgetKind::Mx(_) => Kind::Mx,
            GadgetKind::String(_) => Kind::String,
            GadgetKind::Text(_) => Kind::Text,
        })
    }

    pub fn string_info(&self) -> Option<&StringInfo> {
        match self {
            GadgetKind::String(si) | GadgetKind::Integer(si) => si.as_ref(),
            _ => None,
        }
    }

    pub fn string_info_mut(&mut self) -> Option<&mut StringInfo> {
        match self {
            GadgetKind::String(si) | GadgetKind::Integer(si) => si.as_mut(),
            _ => None,
        }
    }

    /// Kinds that take keyboard input.
    pub fn is_text_entry(&self) -> bool {
        matches!(self, GadgetKind::String(_) | GadgetKind::Integer(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gadget {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub flags: GadgetFlags,
    pub activation: Activation,
    pub label: Option<IntuiText>,
    pub place: Place,
    /// Index into the first label run of the underlined character.
    pub underscore: Option<usize>,
    pub id: u16,
    pub user_data: usize,
    pub kind: GadgetKind,
}

impl Gadget {
    pub fn context() -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            flags: GadgetFlags::empty(),
            activation: Activation::empty(),
            label: None,
            place: Place::In,
            underscore: None,
            id: 0,
            user_data: 0,
            kind: GadgetKind::Context,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.contains(GadgetFlags::DISABLED)
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(GadgetFlags::ACTIVE)
    }

    /// Reachable by tab traversal right now.
    pub fn tab_eligible(&self) -> bool {
        self.flags.contains(GadgetFlags::TAB_CYCLE)
            && !self.is_disabled()
            && !matches!(self.kind, GadgetKind::Context)
    }

    /// Whether a click at (x, y) lands on this gadget.
    pub fn hit(&self, x: i32, y: i32) -> bool {
        let clickable = !matches!(self.kind, GadgetKind::Context | GadgetKind::Text(_));
        clickable && !self.is_disabled() && self.rect().contains(x, y)
    }
}
